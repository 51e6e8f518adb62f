use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ResolutionMode, ResolverConfig};

/// A source reference resolved into something a frame renderer can open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "camelCase")]
pub enum ResolvedSource {
    /// File on the local filesystem.
    LocalFile(PathBuf),
    /// Network URL the renderer is expected to stream.
    Remote(String),
}

/// Why a source reference could not be resolved.
///
/// All variants are recoverable at the item level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum ResolutionError {
    /// No reference was given.
    #[error("empty source reference")]
    Empty,
    /// A segment reference mapped onto a store path that does not exist.
    #[error("media file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// A network URL was given while resolving to local files only.
    #[error("remote sources are not supported in local-file mode: {0}")]
    RemoteUnsupported(String),
    /// The reference has no recognized shape. Carries the original string so callers can
    /// still hand it to the renderer unchanged.
    #[error("unable to resolve source reference: {0}")]
    Unresolvable(String),
}

impl ResolutionError {
    /// Original reference to use as a best-effort source, if this failure allows one.
    pub fn passthrough(&self) -> Option<&str> {
        match self {
            Self::Unresolvable(raw) => Some(raw),
            _ => None,
        }
    }
}

/// Quality tier of a stored media segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentQuality {
    /// Full-quality intermediate encode.
    Mezzanine,
    /// Low-resolution editing proxy.
    Proxy,
}

impl SegmentQuality {
    /// Directory name used by the media store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mezzanine => "mezzanine",
            Self::Proxy => "proxy",
        }
    }
}

impl FromStr for SegmentQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mezzanine" => Ok(Self::Mezzanine),
            "proxy" => Ok(Self::Proxy),
            other => Err(format!("unknown segment quality \"{other}\"")),
        }
    }
}

impl fmt::Display for SegmentQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `{analysis_id}/{quality}/{filename}` tail of a structured segment reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef<'a> {
    /// Analysis the segment belongs to.
    pub analysis_id: &'a str,
    /// Quality tier.
    pub quality: SegmentQuality,
    /// File name inside the tier directory.
    pub filename: &'a str,
}

impl<'a> SegmentRef<'a> {
    /// Parse the part of a reference that follows the segment route.
    ///
    /// Exactly three non-empty segments are required; `.` and `..` are rejected so a
    /// reference can never escape the store root.
    pub fn parse(tail: &'a str) -> Option<Self> {
        let mut parts = tail.split('/');
        let analysis_id = parts.next()?;
        let quality = parts.next()?;
        let filename = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        for part in [analysis_id, quality, filename] {
            if part.is_empty() || part == "." || part == ".." || part.contains('\\') {
                return None;
            }
        }
        Some(Self {
            analysis_id,
            quality: quality.parse().ok()?,
            filename,
        })
    }

    /// Location of this segment under `store_root`.
    pub fn store_path(&self, store_root: &Path) -> PathBuf {
        store_root
            .join(self.analysis_id)
            .join("segments")
            .join(self.quality.as_str())
            .join(self.filename)
    }
}

/// Maps abstract source references onto renderer-usable sources.
///
/// Resolution is driven by the shape of the reference only. The single side effect is a
/// read-only existence check for segment references in [`ResolutionMode::LocalFile`].
#[derive(Debug, Clone)]
pub struct MediaLocationResolver {
    config: ResolverConfig,
    route: String,
    base_url: String,
}

impl MediaLocationResolver {
    /// Build a resolver from its configuration.
    pub fn new(config: ResolverConfig) -> Self {
        let route = format!("/{}/", config.segment_route.trim_matches('/'));
        let route = if config.segment_route.starts_with('/') {
            route
        } else {
            route[1..].to_owned()
        };
        let base_url = config.remote_base_url.trim_end_matches('/').to_owned();
        Self {
            config,
            route,
            base_url,
        }
    }

    /// Configuration this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `reference` according to the configured [`ResolutionMode`].
    ///
    /// Whitespace only matters for the emptiness check. Paths and URLs are classified and
    /// returned exactly as given, so `" /a.mp4"` is not an absolute path.
    pub fn resolve(&self, reference: &str) -> Result<ResolvedSource, ResolutionError> {
        if reference.trim().is_empty() {
            return Err(ResolutionError::Empty);
        }

        if let Some(tail) = self.segment_tail(reference) {
            let Some(segment) = SegmentRef::parse(tail) else {
                tracing::debug!(reference, "malformed segment reference");
                return Err(ResolutionError::Unresolvable(reference.to_owned()));
            };
            return self.resolve_segment(&segment);
        }

        if let Some(path) = strip_scheme(reference, "file://") {
            if Path::new(path).is_absolute() {
                return Ok(ResolvedSource::LocalFile(PathBuf::from(path)));
            }
            return Err(ResolutionError::Unresolvable(reference.to_owned()));
        }

        if is_remote_url(reference) {
            return match self.config.mode {
                ResolutionMode::LocalFile => {
                    Err(ResolutionError::RemoteUnsupported(reference.to_owned()))
                }
                ResolutionMode::RemotePassthrough => {
                    Ok(ResolvedSource::Remote(reference.to_owned()))
                }
            };
        }

        let is_api_path =
            !self.config.api_prefix.is_empty() && reference.starts_with(&self.config.api_prefix);
        if !is_api_path && Path::new(reference).is_absolute() {
            return Ok(ResolvedSource::LocalFile(PathBuf::from(reference)));
        }

        tracing::debug!(reference, "unrecognized source reference shape");
        Err(ResolutionError::Unresolvable(reference.to_owned()))
    }

    fn resolve_segment(&self, segment: &SegmentRef<'_>) -> Result<ResolvedSource, ResolutionError> {
        match self.config.mode {
            ResolutionMode::LocalFile => {
                let path = segment.store_path(&self.config.store_root);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "resolved segment to local file");
                    Ok(ResolvedSource::LocalFile(path))
                } else {
                    Err(ResolutionError::NotFound(path))
                }
            }
            ResolutionMode::RemotePassthrough => {
                let route = self.route.trim_end_matches('/');
                let sep = if route.starts_with('/') { "" } else { "/" };
                Ok(ResolvedSource::Remote(format!(
                    "{}{sep}{route}/{}/{}/{}",
                    self.base_url, segment.analysis_id, segment.quality, segment.filename
                )))
            }
        }
    }

    /// Tail of a structured reference following the segment route, if `reference` has that
    /// shape. In local-file mode absolute URLs pointing at the media API are accepted too.
    fn segment_tail<'r>(&self, reference: &'r str) -> Option<&'r str> {
        if self.route.trim_matches('/').is_empty() {
            return None;
        }
        if let Some(tail) = reference.strip_prefix(self.route.as_str()) {
            return Some(tail);
        }
        if self.config.mode != ResolutionMode::LocalFile || self.base_url.is_empty() {
            return None;
        }
        let rest = reference.strip_prefix(self.base_url.as_str())?;
        let rest = if self.route.starts_with('/') {
            rest
        } else {
            rest.strip_prefix('/')?
        };
        rest.strip_prefix(self.route.as_str())
    }
}

fn strip_scheme<'r>(reference: &'r str, scheme: &str) -> Option<&'r str> {
    let head = reference.get(..scheme.len())?;
    if head.eq_ignore_ascii_case(scheme) {
        Some(&reference[scheme.len()..])
    } else {
        None
    }
}

fn is_remote_url(reference: &str) -> bool {
    strip_scheme(reference, "http://").is_some() || strip_scheme(reference, "https://").is_some()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
