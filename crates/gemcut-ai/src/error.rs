//! Error types for the AI subsystem.

use thiserror::Error;

/// Errors that can occur when talking to the generation service.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured.
    #[error("API key is missing (set API_KEY)")]
    MissingApiKey,

    /// Nothing to send.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered successfully but without any text.
    #[error("Service returned no text")]
    EmptyResponse,

    /// The response text was not the JSON we asked for.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Result type alias for AI operations.
pub type AiResult<T> = std::result::Result<T, AiError>;
