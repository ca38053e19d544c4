/// Crate-wide result alias.
pub type LyricueResult<T> = Result<T, LyricueError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for project loading, interpolation, and rendering.
pub enum LyricueError {
    /// A project, table, or argument failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An interpolation curve was malformed (mismatched lengths, non-increasing input).
    #[error("interpolation error: {0}")]
    Interpolation(String),

    /// SVG generation or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyricueError {
    /// Build a [`LyricueError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LyricueError::Interpolation`].
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::Interpolation(msg.into())
    }

    /// Build a [`LyricueError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LyricueError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LyricueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
