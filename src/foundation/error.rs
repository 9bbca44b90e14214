/// Convenience result type used across letterfx.
pub type LetterFxResult<T> = Result<T, LetterFxError>;

/// Top-level error taxonomy for fallible construction and loading APIs.
///
/// Per-character operations never return these; they degrade to a no-op and
/// record a [`crate::Diagnostic`] instead.
#[derive(thiserror::Error, Debug)]
pub enum LetterFxError {
    /// A font file or font descriptor could not be loaded or parsed.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LetterFxError {
    /// Build a [`LetterFxError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`LetterFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LetterFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
