//! Text layout and rendering error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("text measurement failed: {0}")]
    Measure(String),

    #[error("draw call failed: {0}")]
    Draw(String),

    #[error("font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
