/// Convenience result type used across pulpgfx.
pub type PulpResult<T> = Result<T, PulpError>;

/// Top-level error taxonomy used by the rasterizer and the codecs.
#[derive(thiserror::Error, Debug)]
pub enum PulpError {
    /// Malformed or unsupported encoded image data.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while encoding a pixel buffer.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid caller-provided arguments or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// `pop` on a transform stack with no saved entries.
    #[error("transform stack is empty")]
    EmptyTransformStack,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PulpError {
    /// Build a [`PulpError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PulpError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PulpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
