//! Text completion capability.

use async_trait::async_trait;

use crate::error::AIError;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,

    /// User prompt
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask the provider for a single JSON object
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.0,
            json_mode: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// AI trait for LLM completions.
///
/// Implementations wrap a specific provider and own the model identifier.
/// They return the raw completion text; parsing belongs to the caller.
#[async_trait]
pub trait AI: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AIError>;
}

#[async_trait]
impl<T: AI + ?Sized> AI for std::sync::Arc<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AIError> {
        (**self).complete(request).await
    }
}
