/// Convenience result type used across pawpost.
pub type PostResult<T> = Result<T, PostError>;

/// Top-level error taxonomy used by the editor core.
///
/// Editing commands never surface these; they degrade to an [`crate::Outcome`] instead.
/// Errors are reserved for malformed configuration, asset decoding, rasterization and
/// export IO.
#[derive(thiserror::Error, Debug)]
pub enum PostError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while accepting or decoding an uploaded asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while composing or rasterizing a slide.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing exported slides.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostError {
    /// Build a [`PostError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PostError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PostError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`PostError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
