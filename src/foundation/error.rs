/// Convenience result type used across reelcut.
pub type ReelResult<T> = Result<T, ReelError>;

/// Hard failures reported to the caller.
///
/// Item-level problems never surface here; they are recovered locally and reported as
/// [`crate::CompileWarning`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Structurally invalid timeline document or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
