//! Structured compile diagnostics.
//!
//! Item-level problems never abort a compile. Each one becomes a [`CompileWarning`] that is
//! recorded on the compiled output and forwarded to an injected [`CompileObserver`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assets::resolve::ResolutionError;
use crate::timeline::model::ItemId;

/// Recoverable, item-level compile diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CompileWarning {
    /// An id in `trackItemIds` has no entry in `trackItemsMap`.
    MissingItem {
        /// Dangling id.
        item_id: ItemId,
    },
    /// The `trackItemsMap` entry could not be decoded as an item; the item was skipped.
    InvalidItem {
        /// Skipped item.
        item_id: ItemId,
        /// Decoder message.
        message: String,
    },
    /// The item's frame window is empty or inverted; the item was skipped.
    InvalidFrameWindow {
        /// Skipped item.
        item_id: ItemId,
        /// Computed start frame.
        start_frame: i64,
        /// Computed (exclusive) end frame.
        end_frame: i64,
    },
    /// The item's source reference did not resolve; the instruction carries a missing or
    /// best-effort source.
    SourceUnresolved {
        /// Affected item.
        item_id: ItemId,
        /// Reference as authored, if any.
        reference: Option<String>,
        /// Resolver failure.
        error: ResolutionError,
    },
    /// The item type is not one the renderer knows; a placeholder was emitted.
    UnknownItemType {
        /// Affected item.
        item_id: ItemId,
        /// Raw type string.
        item_type: String,
    },
    /// A styling or playback field was unusable and its default was substituted.
    InvalidStyle {
        /// Affected item.
        item_id: ItemId,
        /// Field name as authored.
        field: String,
        /// Offending value.
        value: String,
    },
}

impl CompileWarning {
    /// Item the warning refers to.
    pub fn item_id(&self) -> &str {
        match self {
            Self::MissingItem { item_id }
            | Self::InvalidItem { item_id, .. }
            | Self::InvalidFrameWindow { item_id, .. }
            | Self::SourceUnresolved { item_id, .. }
            | Self::UnknownItemType { item_id, .. }
            | Self::InvalidStyle { item_id, .. } => item_id,
        }
    }
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingItem { item_id } => write!(f, "item '{item_id}' not found"),
            Self::InvalidItem { item_id, message } => {
                write!(f, "item '{item_id}' is malformed: {message}")
            }
            Self::InvalidFrameWindow {
                item_id,
                start_frame,
                end_frame,
            } => write!(
                f,
                "item '{item_id}' has an empty frame window [{start_frame}, {end_frame})"
            ),
            Self::SourceUnresolved { item_id, error, .. } => {
                write!(f, "item '{item_id}' source unresolved: {error}")
            }
            Self::UnknownItemType { item_id, item_type } => {
                write!(f, "item '{item_id}' has unknown type '{item_type}'")
            }
            Self::InvalidStyle {
                item_id,
                field,
                value,
            } => write!(f, "item '{item_id}' has invalid {field} '{value}'"),
        }
    }
}

/// Receives diagnostics as the compiler produces them.
pub trait CompileObserver {
    /// Called once per warning, in emission order.
    fn on_warning(&mut self, warning: &CompileWarning);
}

impl<F> CompileObserver for F
where
    F: FnMut(&CompileWarning),
{
    fn on_warning(&mut self, warning: &CompileWarning) {
        self(warning)
    }
}

/// Forwards every warning to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CompileObserver for TracingObserver {
    fn on_warning(&mut self, warning: &CompileWarning) {
        tracing::warn!(item_id = warning.item_id(), "{warning}");
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    warnings: Vec<CompileWarning>,
}

impl CollectingObserver {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far.
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    /// Consume the collector and return its warnings.
    pub fn into_warnings(self) -> Vec<CompileWarning> {
        self.warnings
    }
}

impl CompileObserver for CollectingObserver {
    fn on_warning(&mut self, warning: &CompileWarning) {
        self.warnings.push(warning.clone());
    }
}

#[cfg(test)]
#[path = "../tests/unit/diagnostics.rs"]
mod tests;
