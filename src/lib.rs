//! Reelcut compiles editor timelines into render manifests.
//!
//! A [`TimelineDocument`] is the editor's millisecond-based JSON description of clips, text,
//! captions and gaps. [`TimelineCompiler`] turns it into a [`CompiledTimeline`]: composition
//! parameters plus frame-accurate, layered [`RenderInstruction`]s that a frame renderer can
//! consume without further interpretation.
//!
//! - Load a document with [`TimelineDocument::from_path`] or [`TimelineDocument::from_json_str`]
//! - Build a [`TimelineCompiler`] from a [`CompilerConfig`]
//! - Compile, optionally observing item-level [`CompileWarning`]s as they happen
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compile;
mod foundation;
mod timeline;

/// Compiler configuration.
pub mod config;
/// Structured compile diagnostics.
pub mod diagnostics;

pub use crate::foundation::core::{Canvas, Fps, FrameWindow};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::assets::color::Color;
pub use crate::assets::resolve::{
    MediaLocationResolver, ResolutionError, ResolvedSource, SegmentQuality, SegmentRef,
};
pub use crate::compile::builder::{
    BuiltPayload, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT, InstructionBuilder,
    MIN_FONT_SIZE,
};
pub use crate::compile::compiler::TimelineCompiler;
pub use crate::compile::fingerprint::TimelineFingerprint;
pub use crate::compile::instruction::{
    AudioPayload, CompiledTimeline, CompositionParams, GapPayload, ImagePayload, MediaSource,
    ObjectFit, Payload, RenderInstruction, TextBoxStyle, TextPayload, TextRole, TextTreatment,
    UnknownPayload, VideoPayload,
};
pub use crate::config::{CompilerConfig, ResolutionMode, ResolverConfig};
pub use crate::diagnostics::{
    CollectingObserver, CompileObserver, CompileWarning, TracingObserver,
};
pub use crate::timeline::model::{
    CompositionSettings, ItemDetails, ItemId, ItemKind, TimeSpan, TimelineDocument, TimelineItem,
};
