use crate::assets::color::Color;
use crate::assets::resolve::{MediaLocationResolver, ResolutionError};
use crate::compile::instruction::{
    AudioPayload, GapPayload, ImagePayload, MediaSource, ObjectFit, Payload, TextPayload,
    TextRole, TextTreatment, UnknownPayload, VideoPayload,
};
use crate::diagnostics::CompileWarning;
use crate::foundation::core::Fps;
use crate::timeline::model::{ItemKind, TimelineItem};

/// Placeholder shown for text items that carry no text.
pub const DEFAULT_TEXT: &str = "Sample Text";
/// Font size used when an item does not set one.
pub const DEFAULT_FONT_SIZE: f64 = 48.0;
/// Smallest font size a text payload is allowed to have.
pub const MIN_FONT_SIZE: f64 = 24.0;
/// Font family used when an item does not set one.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Payload for one item plus the warnings raised while building it.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltPayload {
    /// Rendering parameters.
    pub payload: Payload,
    /// Item-level diagnostics.
    pub warnings: Vec<CompileWarning>,
}

/// Turns a single timeline item into typed rendering parameters.
///
/// Never fails: unusable fields fall back to defaults and unresolvable sources become
/// [`MediaSource::Missing`] or [`MediaSource::BestEffort`], each with a warning.
#[derive(Debug, Clone, Copy)]
pub struct InstructionBuilder<'r> {
    resolver: &'r MediaLocationResolver,
}

impl<'r> InstructionBuilder<'r> {
    /// Builder resolving sources through `resolver`.
    pub fn new(resolver: &'r MediaLocationResolver) -> Self {
        Self { resolver }
    }

    /// Build the payload of `item`, reported under `item_id`.
    pub fn build(&self, item_id: &str, item: &TimelineItem, fps: Fps) -> BuiltPayload {
        let mut cx = ItemCx {
            item_id,
            item,
            fps,
            warnings: Vec::new(),
        };

        let payload = match &item.kind {
            ItemKind::Video => Payload::Video(VideoPayload {
                source: self.source(&mut cx),
                start_from: cx.trim_start(),
                end_at: cx.trim_end(),
                volume: cx.volume(),
                playback_rate: cx.playback_rate(),
                fit: cx.fit(),
            }),
            ItemKind::Image => Payload::Image(ImagePayload {
                source: self.source(&mut cx),
                fit: cx.fit(),
            }),
            ItemKind::Audio => Payload::Audio(AudioPayload {
                source: self.source(&mut cx),
                start_from: cx.trim_start(),
                end_at: cx.trim_end(),
                volume: cx.volume(),
                playback_rate: cx.playback_rate(),
            }),
            ItemKind::Text => Payload::Text(cx.text(TextRole::Text)),
            ItemKind::Caption => Payload::Text(cx.text(TextRole::Caption)),
            ItemKind::Gap => Payload::Gap(GapPayload {
                color: cx.color(
                    "backgroundColor",
                    item.details.background_color.as_deref(),
                    Color::BLACK,
                ),
            }),
            ItemKind::Other(raw) => {
                cx.warn(CompileWarning::UnknownItemType {
                    item_id: item_id.to_owned(),
                    item_type: raw.clone(),
                });
                Payload::Unknown(UnknownPayload {
                    item_type: raw.clone(),
                })
            }
        };

        BuiltPayload {
            payload,
            warnings: cx.warnings,
        }
    }

    fn source(&self, cx: &mut ItemCx<'_>) -> MediaSource {
        let reference = cx.item.details.src.as_deref();
        let outcome = match reference {
            Some(r) => self.resolver.resolve(r),
            None => Err(ResolutionError::Empty),
        };
        if let Err(error) = &outcome {
            cx.warn(CompileWarning::SourceUnresolved {
                item_id: cx.item_id.to_owned(),
                reference: reference.map(str::to_owned),
                error: error.clone(),
            });
        }
        MediaSource::from_resolution(reference, outcome)
    }
}

struct ItemCx<'a> {
    item_id: &'a str,
    item: &'a TimelineItem,
    fps: Fps,
    warnings: Vec<CompileWarning>,
}

impl ItemCx<'_> {
    fn warn(&mut self, warning: CompileWarning) {
        self.warnings.push(warning);
    }

    fn invalid(&mut self, field: &str, value: impl ToString) {
        self.warn(CompileWarning::InvalidStyle {
            item_id: self.item_id.to_owned(),
            field: field.to_owned(),
            value: value.to_string(),
        });
    }

    fn trim_start(&self) -> i64 {
        self.fps.ms_to_frame(self.item.trim.from.unwrap_or(0.0))
    }

    // Falls back to the display end; `None` means play to the end of the source.
    fn trim_end(&self) -> Option<i64> {
        self.item
            .trim
            .to
            .or(self.item.display.to)
            .map(|ms| self.fps.ms_to_frame(ms))
    }

    fn volume(&mut self) -> f64 {
        let Some(percent) = self.item.details.volume else {
            return 1.0;
        };
        if !percent.is_finite() {
            self.invalid("volume", percent);
            return 1.0;
        }
        if !(0.0..=100.0).contains(&percent) {
            self.invalid("volume", percent);
        }
        (percent / 100.0).clamp(0.0, 1.0)
    }

    fn playback_rate(&mut self) -> f64 {
        match self.item.details.playback_rate {
            None => 1.0,
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            Some(rate) => {
                self.invalid("playbackRate", rate);
                1.0
            }
        }
    }

    fn fit(&mut self) -> ObjectFit {
        let Some(raw) = self.item.details.object_fit.as_deref() else {
            return ObjectFit::default();
        };
        ObjectFit::parse(raw).unwrap_or_else(|| {
            self.invalid("objectFit", raw);
            ObjectFit::default()
        })
    }

    fn color(&mut self, field: &str, raw: Option<&str>, default: Color) -> Color {
        let Some(raw) = raw else {
            return default;
        };
        Color::parse(raw).unwrap_or_else(|_| {
            self.invalid(field, raw);
            default
        })
    }

    fn font_size(&mut self) -> f64 {
        let size = match self.item.details.font_size {
            None => DEFAULT_FONT_SIZE,
            Some(size) if size.is_finite() => size,
            Some(size) => {
                self.invalid("fontSize", size);
                DEFAULT_FONT_SIZE
            }
        };
        size.max(MIN_FONT_SIZE)
    }

    fn text(&mut self, role: TextRole) -> TextPayload {
        let details = &self.item.details;
        let text = match details.text.as_deref() {
            Some(t) if !t.is_empty() => t.to_owned(),
            _ => DEFAULT_TEXT.to_owned(),
        };
        let font_family = match details.font_family.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f.to_owned(),
            _ => DEFAULT_FONT_FAMILY.to_owned(),
        };
        let treatment = if self.item.is_ai_generated() {
            TextTreatment::AiGenerated
        } else {
            TextTreatment::Standard
        };

        TextPayload {
            role,
            text,
            color: self.color("color", self.item.details.color.as_deref(), Color::WHITE),
            font_size: self.font_size(),
            font_family,
            treatment,
            box_style: treatment.box_style(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/builder.rs"]
mod tests;
