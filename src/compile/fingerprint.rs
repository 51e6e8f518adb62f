use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::assets::color::Color;
use crate::assets::resolve::ResolutionError;
use crate::compile::instruction::{
    CompiledTimeline, MediaSource, ObjectFit, Payload, RenderInstruction, TextBoxStyle, TextRole,
    TextTreatment,
};

const XXH3_SEED: u64 = 0x5eed_c0de_7a1e_11e5;

/// Stable content fingerprint of a compiled timeline.
///
/// Two compiles of the same document against the same store state always agree. Used by
/// renderers to skip re-rendering an unchanged manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl fmt::Display for TimelineFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) fn fingerprint_timeline(timeline: &CompiledTimeline) -> TimelineFingerprint {
    let mut h = StableHasher::new();
    let c = &timeline.composition;
    h.write_u32(c.width);
    h.write_u32(c.height);
    h.write_u32(c.fps);
    h.write_u64(c.duration_in_frames);

    h.write_u64(timeline.instructions.len() as u64);
    for instr in &timeline.instructions {
        write_instruction(&mut h, instr);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    // Length-prefixed so adjacent strings cannot alias.
    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_opt_str(&mut self, s: Option<&str>) {
        match s {
            None => self.write_u8(0),
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
        }
    }

    fn write_opt_i64(&mut self, v: Option<i64>) {
        match v {
            None => self.write_u8(0),
            Some(v) => {
                self.write_u8(1);
                self.write_i64(v);
            }
        }
    }

    fn write_color(&mut self, c: Color) {
        self.write_bytes(&[c.r, c.g, c.b, c.a]);
    }

    fn finish(self) -> TimelineFingerprint {
        let v = self.inner.digest128();
        TimelineFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_instruction(h: &mut StableHasher, instr: &RenderInstruction) {
    h.write_str(&instr.item_id);
    h.write_i64(instr.frame_window.start_frame);
    h.write_u64(instr.frame_window.frame_count);
    h.write_u64(instr.layer as u64);

    match &instr.payload {
        Payload::Video(v) => {
            h.write_u8(0);
            write_source(h, &v.source);
            h.write_i64(v.start_from);
            h.write_opt_i64(v.end_at);
            h.write_f64(v.volume);
            h.write_f64(v.playback_rate);
            write_fit(h, v.fit);
        }
        Payload::Image(i) => {
            h.write_u8(1);
            write_source(h, &i.source);
            write_fit(h, i.fit);
        }
        Payload::Audio(a) => {
            h.write_u8(2);
            write_source(h, &a.source);
            h.write_i64(a.start_from);
            h.write_opt_i64(a.end_at);
            h.write_f64(a.volume);
            h.write_f64(a.playback_rate);
        }
        Payload::Text(t) => {
            h.write_u8(3);
            h.write_u8(match t.role {
                TextRole::Text => 0,
                TextRole::Caption => 1,
            });
            h.write_str(&t.text);
            h.write_color(t.color);
            h.write_f64(t.font_size);
            h.write_str(&t.font_family);
            h.write_u8(match t.treatment {
                TextTreatment::Standard => 0,
                TextTreatment::AiGenerated => 1,
            });
            write_box_style(h, &t.box_style);
        }
        Payload::Gap(g) => {
            h.write_u8(4);
            h.write_color(g.color);
        }
        Payload::Unknown(u) => {
            h.write_u8(5);
            h.write_str(&u.item_type);
        }
    }
}

fn write_source(h: &mut StableHasher, source: &MediaSource) {
    match source {
        MediaSource::LocalFile { path } => {
            h.write_u8(0);
            h.write_str(&path.to_string_lossy());
        }
        MediaSource::Remote { url } => {
            h.write_u8(1);
            h.write_str(url);
        }
        MediaSource::BestEffort { reference } => {
            h.write_u8(2);
            h.write_str(reference);
        }
        MediaSource::Missing { reference, reason } => {
            h.write_u8(3);
            h.write_opt_str(reference.as_deref());
            match reason {
                ResolutionError::Empty => h.write_u8(0),
                ResolutionError::NotFound(path) => {
                    h.write_u8(1);
                    h.write_str(&path.to_string_lossy());
                }
                ResolutionError::RemoteUnsupported(url) => {
                    h.write_u8(2);
                    h.write_str(url);
                }
                ResolutionError::Unresolvable(raw) => {
                    h.write_u8(3);
                    h.write_str(raw);
                }
            }
        }
    }
}

fn write_fit(h: &mut StableHasher, fit: ObjectFit) {
    h.write_u8(match fit {
        ObjectFit::Cover => 0,
        ObjectFit::Contain => 1,
        ObjectFit::Fill => 2,
    });
}

fn write_box_style(h: &mut StableHasher, style: &TextBoxStyle) {
    h.write_u64(style.background.len() as u64);
    for c in &style.background {
        h.write_color(*c);
    }
    match style.gradient_angle_deg {
        None => h.write_u8(0),
        Some(deg) => {
            h.write_u8(1);
            h.write_f64(deg);
        }
    }
    h.write_f64(style.border_width_px);
    h.write_color(style.border_color);
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
