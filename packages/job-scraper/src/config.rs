//! Model endpoint configuration loaded from the environment.

use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt;
use url::Url;

use crate::error::ConfigError;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";

pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.1;

/// Settings for the completion endpoint.
pub struct LlmConfig {
    api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    /// Build a validated config.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::invalid("api key", "must not be empty"));
        }

        let base_url = base_url.into();
        let parsed =
            Url::parse(&base_url).map_err(|e| ConfigError::invalid("base url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base url",
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }

        let model = model.into();
        if model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "must not be empty"));
        }

        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::invalid(
                "temperature",
                format!("{} is outside 0..=2", temperature),
            ));
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            model,
            temperature,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let base_url = lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());
        let model = lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        let temperature = match lookup("LLM_TEMPERATURE") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::invalid("temperature", format!("not a number: {}", raw))
            })?,
            None => DEFAULT_LLM_TEMPERATURE,
        };

        Self::new(api_key, base_url, model, temperature)
    }

    /// Expose the API key for use in a request.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}
