//! Editor-facing timeline document model.
//!
//! This is the JSON boundary produced by the upstream editor. It is read once, validated
//! structurally, and handed to the compiler by reference; nothing here is mutated during
//! compilation.

pub(crate) mod document;
pub(crate) mod model;
