//! Error types for GemCut.

use thiserror::Error;

/// Main error type for GemCut operations.
#[derive(Error, Debug)]
pub enum GemCutError {
    /// A color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for GemCut operations.
pub type Result<T> = std::result::Result<T, GemCutError>;
