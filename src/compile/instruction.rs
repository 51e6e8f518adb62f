use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::assets::color::Color;
use crate::assets::resolve::{ResolutionError, ResolvedSource};
use crate::compile::fingerprint::{TimelineFingerprint, fingerprint_timeline};
use crate::diagnostics::CompileWarning;
use crate::foundation::core::FrameWindow;
use crate::timeline::model::ItemId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Output of a compile: everything the external renderer needs, plus diagnostics.
pub struct CompiledTimeline {
    /// Overall composition parameters.
    pub composition: CompositionParams,
    /// Instructions in `trackItemIds` order.
    pub instructions: Vec<RenderInstruction>,
    /// Item-level diagnostics, in emission order.
    pub warnings: Vec<CompileWarning>,
}

impl CompiledTimeline {
    /// Stable content fingerprint of composition parameters and instructions.
    ///
    /// Warnings are not part of the fingerprint.
    pub fn fingerprint(&self) -> TimelineFingerprint {
        fingerprint_timeline(self)
    }

    /// Instructions whose frame window covers `frame`, bottom layer first.
    pub fn active_at(&self, frame: i64) -> impl Iterator<Item = &RenderInstruction> {
        self.instructions
            .iter()
            .filter(move |i| i.frame_window.contains(frame))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Composition-level render parameters.
pub struct CompositionParams {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Total frames: `round(duration / 1000 * fps)`.
    pub duration_in_frames: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single placed rendering instruction.
pub struct RenderInstruction {
    /// Timeline item this instruction was built from.
    pub item_id: ItemId,
    /// Where the instruction sits on the frame axis.
    pub frame_window: FrameWindow,
    /// Z-order; higher draws on top. Equal to the item's index in `trackItemIds`.
    pub layer: usize,
    /// What to draw or play.
    pub payload: Payload,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Typed rendering parameters of one instruction.
pub enum Payload {
    /// Video clip with its audio track.
    Video(VideoPayload),
    /// Still image.
    Image(ImagePayload),
    /// Audio-only clip.
    Audio(AudioPayload),
    /// Text or caption overlay.
    Text(TextPayload),
    /// Solid fill.
    Gap(GapPayload),
    /// Placeholder for an item type the renderer does not know.
    Unknown(UnknownPayload),
}

impl Payload {
    /// Media source of video, image and audio payloads.
    pub fn source(&self) -> Option<&MediaSource> {
        match self {
            Self::Video(v) => Some(&v.source),
            Self::Image(i) => Some(&i.source),
            Self::Audio(a) => Some(&a.source),
            Self::Text(_) | Self::Gap(_) | Self::Unknown(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
/// Renderer-facing media source of an instruction.
pub enum MediaSource {
    /// Verified or caller-supplied local file.
    LocalFile {
        /// Filesystem path.
        path: PathBuf,
    },
    /// Network URL.
    Remote {
        /// Absolute URL.
        url: String,
    },
    /// Reference of unknown shape handed through unchanged.
    BestEffort {
        /// Reference as authored.
        reference: String,
    },
    /// No usable source; the renderer should draw a missing-media marker.
    Missing {
        /// Reference as authored, if any.
        reference: Option<String>,
        /// Why resolution failed.
        reason: ResolutionError,
    },
}

impl MediaSource {
    /// Turn a resolver outcome into a source, degrading failures instead of propagating them.
    pub fn from_resolution(
        reference: Option<&str>,
        outcome: Result<ResolvedSource, ResolutionError>,
    ) -> Self {
        match outcome {
            Ok(ResolvedSource::LocalFile(path)) => Self::LocalFile { path },
            Ok(ResolvedSource::Remote(url)) => Self::Remote { url },
            Err(err) => match err.passthrough() {
                Some(raw) => Self::BestEffort {
                    reference: raw.to_owned(),
                },
                None => Self::Missing {
                    reference: reference.map(str::to_owned),
                    reason: err,
                },
            },
        }
    }

    /// Whether the renderer has nothing to open.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How visual media is scaled into the frame.
pub enum ObjectFit {
    /// Fill the frame, cropping overflow.
    #[default]
    Cover,
    /// Fit inside the frame, letterboxing as needed.
    Contain,
    /// Stretch to the frame.
    Fill,
}

impl ObjectFit {
    /// Parse a CSS `object-fit` keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "cover" => Some(Self::Cover),
            "contain" => Some(Self::Contain),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Video clip parameters. Trim points are source-relative frames.
pub struct VideoPayload {
    /// Clip source.
    pub source: MediaSource,
    /// First source frame to play.
    pub start_from: i64,
    /// Source frame to stop at; `None` plays to the end of the source.
    pub end_at: Option<i64>,
    /// Linear gain in `[0, 1]`.
    pub volume: f64,
    /// Playback speed multiplier.
    pub playback_rate: f64,
    /// Frame scaling.
    pub fit: ObjectFit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Still image parameters.
pub struct ImagePayload {
    /// Image source.
    pub source: MediaSource,
    /// Frame scaling.
    pub fit: ObjectFit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Audio clip parameters. Trim points are source-relative frames.
pub struct AudioPayload {
    /// Clip source.
    pub source: MediaSource,
    /// First source frame to play.
    pub start_from: i64,
    /// Source frame to stop at; `None` plays to the end of the source.
    pub end_at: Option<i64>,
    /// Linear gain in `[0, 1]`.
    pub volume: f64,
    /// Playback speed multiplier.
    pub playback_rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Which authored item type a text payload came from.
pub enum TextRole {
    /// `text` item.
    Text,
    /// `caption` item.
    Caption,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Cosmetic text box treatment.
pub enum TextTreatment {
    /// Neutral translucent box.
    #[default]
    Standard,
    /// Highlighted box marking machine-generated text.
    AiGenerated,
}

impl TextTreatment {
    /// Background and border styling for this treatment.
    pub fn box_style(self) -> TextBoxStyle {
        match self {
            Self::Standard => TextBoxStyle {
                background: vec![Color::rgba(0, 0, 0, 0.5)],
                gradient_angle_deg: None,
                border_width_px: 1.0,
                border_color: Color::rgba(255, 255, 255, 0.2),
            },
            Self::AiGenerated => TextBoxStyle {
                background: vec![Color::rgba(64, 224, 208, 0.3), Color::rgba(255, 105, 180, 0.3)],
                gradient_angle_deg: Some(45.0),
                border_width_px: 2.0,
                border_color: Color::rgba(64, 224, 208, 0.5),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Resolved text box styling.
pub struct TextBoxStyle {
    /// One color for a solid fill, several for a linear gradient.
    pub background: Vec<Color>,
    /// Gradient angle when `background` has more than one stop.
    pub gradient_angle_deg: Option<f64>,
    /// Border width in pixels.
    pub border_width_px: f64,
    /// Border color.
    pub border_color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Text overlay parameters.
pub struct TextPayload {
    /// Source item type.
    pub role: TextRole,
    /// Literal text.
    pub text: String,
    /// Fill color.
    pub color: Color,
    /// Font size in pixels, never below the readable minimum.
    pub font_size: f64,
    /// CSS-style font family list.
    pub font_family: String,
    /// Cosmetic treatment.
    pub treatment: TextTreatment,
    /// Box styling derived from `treatment`.
    pub box_style: TextBoxStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Solid background fill.
pub struct GapPayload {
    /// Fill color.
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Diagnostic placeholder for an unrecognized item type.
pub struct UnknownPayload {
    /// Raw type string, verbatim.
    pub item_type: String,
}
