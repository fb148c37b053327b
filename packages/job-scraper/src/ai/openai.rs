//! OpenAI-compatible implementation of the AI trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use job_scraper::ai::OpenAI;
//!
//! let ai = OpenAI::new("gsk-...")
//!     .with_base_url("https://api.groq.com/openai/v1")
//!     .with_model("llama-3.1-8b-instant");
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError, ResponseFormat};
use tracing::debug;

use crate::config::{LlmConfig, DEFAULT_LLM_MODEL};
use crate::error::AIError;
use crate::traits::{CompletionRequest, AI};

/// Chat-completions backed AI.
#[derive(Debug, Clone)]
pub struct OpenAI {
    client: OpenAIClient,
    model: String,
}

impl OpenAI {
    /// Create a client for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_LLM_MODEL.to_string(),
        }
    }

    /// Build from validated configuration.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.api_key())
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (Groq, local servers, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let chat = ChatRequest::new(&self.model)
            .message(Message::system(&request.system))
            .message(Message::user(&request.user))
            .temperature(request.temperature);
        if request.json_mode {
            chat.response_format(ResponseFormat::json_object())
        } else {
            chat
        }
    }
}

#[async_trait]
impl AI for OpenAI {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AIError> {
        let response = self
            .client
            .chat_completion(self.chat_request(request))
            .await
            .map_err(|e: OpenAIError| AIError::Request(Box::new(e)))?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        if response.content.trim().is_empty() {
            return Err(AIError::Empty);
        }
        Ok(response.content)
    }
}
