//! Timeline compilation: frame windows, per-item payloads and layering.

pub(crate) mod builder;
pub(crate) mod compiler;
pub(crate) mod fingerprint;
pub(crate) mod instruction;
