use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::core::Canvas;

/// Identifier of a timeline item.
pub type ItemId = String;

/// Serialized timeline as authored by the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument {
    /// Optional document identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Items keyed by id, kept as raw JSON. Each entry is decoded on its own so one
    /// malformed item cannot fail the whole document; see [`TimelineDocument::item`].
    #[serde(default)]
    pub track_items_map: Option<BTreeMap<ItemId, serde_json::Value>>,
    /// Iteration and layering order; later ids draw on top.
    #[serde(default)]
    pub track_item_ids: Option<Vec<ItemId>>,
    /// Timeline duration in milliseconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Frames per second.
    #[serde(default, alias = "fps")]
    pub frame_rate: Option<u32>,
    /// Output size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Canvas>,
    /// Export settings attached by the editor; overrides `size` and `frameRate` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_settings: Option<CompositionSettings>,
}

/// Export-time composition overrides.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSettings {
    /// Output width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Output height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Frames per second.
    #[serde(default)]
    pub fps: Option<u32>,
}

/// One entry of the timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Item id. Informational; the map key is authoritative.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ItemId,
    /// Item type.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ItemKind,
    /// Placement on the timeline, in milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: TimeSpan,
    /// Source-relative in/out points, in milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trim: TimeSpan,
    /// Type-specific fields.
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: ItemDetails,
    /// Free-form annotations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl TimelineItem {
    /// Whether `metadata.isAIGenerated` is set to a truthy value.
    pub fn is_ai_generated(&self) -> bool {
        use serde_json::Value;

        match self.metadata.get("isAIGenerated") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }
}

// The editor writes `null` for sections it never touched.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{from, to}` pair in milliseconds. Either bound may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start in milliseconds.
    #[serde(default)]
    pub from: Option<f64>,
    /// End in milliseconds.
    #[serde(default)]
    pub to: Option<f64>,
}

impl TimeSpan {
    /// Span with both bounds set.
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Type-specific item fields. Every field is optional; the builder supplies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    /// Source reference for video, image and audio items.
    #[serde(default, alias = "source", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Literal text for text and caption items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// CSS-style font family list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Volume in percent, `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Playback speed multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback_rate: Option<f64>,
    /// Fill color for gap items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Scaling of visual media into the frame (`cover`, `contain`, `fill`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
}

/// Timeline item type. Unrecognized strings are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Video clip.
    Video,
    /// Still image.
    Image,
    /// Audio-only clip.
    Audio,
    /// Free text overlay.
    Text,
    /// Caption/subtitle overlay.
    Caption,
    /// Solid fill between clips.
    Gap,
    /// Any other type string.
    Other(String),
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl ItemKind {
    /// Map a raw type string onto a kind. Matching is exact.
    pub fn parse(s: &str) -> Self {
        match s {
            "video" => Self::Video,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "text" => Self::Text,
            "caption" => Self::Caption,
            "gap" => Self::Gap,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Raw type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Caption => "caption",
            Self::Gap => "gap",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ItemKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
