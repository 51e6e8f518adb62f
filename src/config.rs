//! Compiler configuration.
//!
//! [`CompilerConfig`] is deserialized from JSON; every section defaults sensibly so an empty
//! `{}` file is valid. The CLI layers its flags on top of whatever the file provides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};

/// Root compiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Source resolution settings.
    pub resolver: ResolverConfig,
    /// Timeline duration in milliseconds used when a document omits `duration`.
    pub default_duration_ms: f64,
    /// Frame rate used when a document omits `frameRate`.
    pub default_frame_rate: u32,
    /// Canvas used when a document carries no size information.
    pub default_canvas: Canvas,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            default_duration_ms: 3000.0,
            default_frame_rate: 30,
            default_canvas: Canvas::default(),
        }
    }
}

impl CompilerConfig {
    /// Deserialize a `CompilerConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> ReelResult<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| ReelError::validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the path is `None` or
    /// the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> ReelResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ReelError::Other(anyhow::Error::new(e).context(format!(
                "read config file '{}'",
                path.display()
            )))),
        }
    }

    /// Validated default frame rate.
    pub fn default_fps(&self) -> ReelResult<Fps> {
        Fps::new(self.default_frame_rate)
            .map_err(|_| ReelError::validation("default_frame_rate must be > 0"))
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.default_frame_rate == 0 {
            warnings.push("default_frame_rate is 0; documents without frameRate will fail".into());
        }
        if !self.default_duration_ms.is_finite() || self.default_duration_ms <= 0.0 {
            warnings.push(format!(
                "default_duration_ms {} is not a positive duration",
                self.default_duration_ms
            ));
        }
        if self.resolver.segment_route.trim_matches('/').is_empty() {
            warnings.push("resolver.segment_route is empty; no reference is structured".into());
        }
        if self.resolver.mode == ResolutionMode::LocalFile && !self.resolver.store_root.is_dir()
        {
            warnings.push(format!(
                "resolver.store_root '{}' is not a directory; segment references will not resolve",
                self.resolver.store_root.display()
            ));
        }

        warnings
    }
}

/// How abstract source references are turned into renderer-usable sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Segment references map onto the local media store and must exist; remote URLs are
    /// rejected.
    #[default]
    LocalFile,
    /// Segment references map onto absolute URLs under `remote_base_url`; remote URLs pass
    /// through untouched.
    RemotePassthrough,
}

/// Media location resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Root of the analyzed media store
    /// (`{store_root}/{analysis_id}/segments/{quality}/{filename}`).
    pub store_root: PathBuf,
    /// Route prefix of structured segment references.
    pub segment_route: String,
    /// Prefix shared by API-style paths. Such paths are never taken as local files.
    pub api_prefix: String,
    /// Base URL of the media API, used by [`ResolutionMode::RemotePassthrough`] and to map
    /// absolute API URLs back onto the store in [`ResolutionMode::LocalFile`].
    pub remote_base_url: String,
    /// Resolution policy.
    pub mode: ResolutionMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from("analyzed_videos_store"),
            segment_route: "/api/segment".into(),
            api_prefix: "/api/".into(),
            remote_base_url: "http://localhost:8080".into(),
            mode: ResolutionMode::LocalFile,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
