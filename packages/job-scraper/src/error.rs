//! Typed errors for the scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! these with context.

use thiserror::Error;

/// Errors reported by a browser session.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// No element matched the selector. This is the only variant the
    /// listing extractor treats as a recoverable field miss.
    #[error("element not found: {selector}")]
    NotFound { selector: String },

    /// A bounded wait expired before the element appeared
    #[error("timed out waiting for: {selector}")]
    Timeout { selector: String },

    /// Navigation to a URL failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Driver / protocol failure (detached node, closed session, CDP error)
    #[error("browser driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Browser could not be started
    #[error("browser launch failed: {0}")]
    Launch(String),
}

impl BrowserError {
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::NotFound {
            selector: selector.into(),
        }
    }

    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Driver(Box::new(err))
    }

    /// True when the page simply lacks the element.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the completion capability.
#[derive(Debug, Error)]
pub enum AIError {
    /// The request never produced a usable response
    #[error("completion request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The completion was empty
    #[error("empty completion")]
    Empty,
}

/// Errors from the operator capability.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Prompt could not be shown or input could not be read
    #[error("operator prompt failed: {0}")]
    Prompt(String),
}

/// Errors writing records to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Invalid configuration detected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A value is present but unusable
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can escape the scraping pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    AI(#[from] AIError),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for browser operations.
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
