use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::model::{ItemId, TimelineDocument, TimelineItem};

impl TimelineDocument {
    /// Parse a timeline document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline document from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse timeline JSON: {e}")))
    }

    /// Parse a timeline document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open timeline JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the structural invariants a compile depends on.
    ///
    /// Only document-level problems fail here. Dangling ids, empty windows and bad item
    /// fields are left to the compiler, which degrades per item.
    pub fn validate(&self) -> ReelResult<()> {
        if self.track_items_map.is_none() && self.track_item_ids.is_none() {
            return Err(ReelError::validation(
                "timeline has neither trackItemsMap nor trackItemIds",
            ));
        }
        if self.frame_rate == Some(0) {
            return Err(ReelError::validation("frameRate must be > 0"));
        }
        if let Some(settings) = self.composition_settings {
            if settings.fps == Some(0) {
                return Err(ReelError::validation("compositionSettings.fps must be > 0"));
            }
            if settings.width == Some(0) || settings.height == Some(0) {
                return Err(ReelError::validation(
                    "compositionSettings width and height must be > 0",
                ));
            }
        }
        if let Some(size) = self.size
            && (size.width == 0 || size.height == 0)
        {
            return Err(ReelError::validation("size width and height must be > 0"));
        }
        if let Some(d) = self.duration
            && !d.is_finite()
        {
            return Err(ReelError::validation("duration must be finite"));
        }
        Ok(())
    }

    /// Ordered item ids; empty when the document has none.
    pub fn item_ids(&self) -> &[ItemId] {
        self.track_item_ids.as_deref().unwrap_or_default()
    }

    /// Look up and decode an item by id.
    ///
    /// `None` when the id has no entry; `Some(Err(_))` when the entry is not a valid item.
    pub fn item(&self, id: &str) -> Option<Result<TimelineItem, serde_json::Error>> {
        let raw = self.track_items_map.as_ref()?.get(id)?;
        Some(TimelineItem::deserialize(raw))
    }

    /// Effective frame rate: `frameRate`, then `compositionSettings.fps`, then `default`.
    ///
    /// `default` is only evaluated when the document declares no rate of its own.
    pub fn fps_or(&self, default: impl FnOnce() -> ReelResult<Fps>) -> ReelResult<Fps> {
        match self
            .frame_rate
            .or_else(|| self.composition_settings.and_then(|s| s.fps))
        {
            Some(fps) => Fps::new(fps),
            None => default(),
        }
    }

    /// Effective duration in milliseconds.
    pub fn duration_ms_or(&self, default_ms: f64) -> f64 {
        self.duration.unwrap_or(default_ms)
    }

    /// Effective output canvas: `compositionSettings`, then `size`, then `default`.
    pub fn canvas_or(&self, default: Canvas) -> Canvas {
        let base = self.size.unwrap_or(default);
        match self.composition_settings {
            Some(s) => Canvas {
                width: s.width.unwrap_or(base.width),
                height: s.height.unwrap_or(base.height),
            },
            None => base,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/document.rs"]
mod tests;
