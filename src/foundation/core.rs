use crate::foundation::error::{ReelError, ReelResult};

/// Integer frames-per-second of a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Fps(u32);

impl Fps {
    /// Create a validated frame rate (`fps > 0`).
    pub fn new(fps: u32) -> ReelResult<Self> {
        if fps == 0 {
            return Err(ReelError::validation("frame rate must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Convert a millisecond offset into a frame index: `round(ms / 1000 * fps)`.
    ///
    /// Halves round toward positive infinity, so `-1.5` maps to `-1`. Non-finite inputs map to
    /// frame 0; results outside `i64` saturate.
    pub fn ms_to_frame(self, ms: f64) -> i64 {
        let frames = (ms / 1000.0 * self.as_f64() + 0.5).floor();
        if frames.is_finite() { frames as i64 } else { 0 }
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(30)
    }
}

/// Location of an instruction on the discrete frame axis.
///
/// Always non-empty: `frame_count >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameWindow {
    /// First frame covered by the window. May be negative for items that start before the
    /// composition does.
    pub start_frame: i64,
    /// Number of frames covered.
    pub frame_count: u64,
}

impl FrameWindow {
    /// Build the window `[start, end)`; returns `None` when `end <= start`.
    pub fn from_bounds(start: i64, end: i64) -> Option<Self> {
        // Any two i64 values differ by at most u64::MAX.
        let count = i128::from(end) - i128::from(start);
        if count <= 0 {
            return None;
        }
        Some(Self {
            start_frame: start,
            frame_count: u64::try_from(count).ok()?,
        })
    }

    /// Exclusive end frame.
    pub fn end_frame(self) -> i64 {
        self.start_frame.saturating_add_unsigned(self.frame_count)
    }

    /// Return `true` when `frame` lies inside `[start, end)`.
    pub fn contains(self, frame: i64) -> bool {
        self.start_frame <= frame && frame < self.end_frame()
    }

    /// Return `true` when both windows share at least one frame.
    pub fn overlaps(self, other: Self) -> bool {
        self.start_frame < other.end_frame() && other.start_frame < self.end_frame()
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
