/// Convenience result type used across Shoreline.
pub type ShorelineResult<T> = Result<T, ShorelineError>;

/// Top-level error taxonomy used by the renderer APIs.
///
/// Painting a frame never fails; errors only surface at the edges (surface configuration,
/// configuration loading, rasterization limits and output encoding).
#[derive(thiserror::Error, Debug)]
pub enum ShorelineError {
    /// Invalid user-provided viewport, configuration or frame range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShorelineError {
    /// Build a [`ShorelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShorelineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ShorelineError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ShorelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
