//! Error types for the chat completion client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Transport failure (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response or a response without usable content
    #[error("API error: {0}")]
    Api(String),

    /// Response body was not the expected JSON envelope
    #[error("Parse error: {0}")]
    Parse(String),
}
