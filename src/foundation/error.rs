/// Convenience result type used across subpreview.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Top-level error taxonomy used by the preview pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Invalid caller-provided configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failures while preparing or writing preview artifacts.
    #[error("io error: {0}")]
    Io(String),

    /// The external rasterization tool failed to produce a required image.
    #[error("rasterize error: {0}")]
    Rasterize(String),

    /// Errors when serializing or deserializing preview requests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    /// Build a [`PreviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PreviewError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`PreviewError::Rasterize`] value.
    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }

    /// Build a [`PreviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
