//! Source references and style values consumed by the instruction builder.

pub(crate) mod color;
pub(crate) mod resolve;
