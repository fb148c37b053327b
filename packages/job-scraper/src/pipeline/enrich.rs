//! Description enrichment via a single completion call.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use super::normalize::today;
use super::prompts::{format_extract_prompt, EXTRACT_SYSTEM_PROMPT};
use crate::error::AIError;
use crate::traits::{CompletionRequest, AI};
use crate::types::{ExtractionResult, SchemaViolation, SCHEMA_VERSION};

/// Default sampling temperature for enrichment.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Error)]
enum EnrichError {
    #[error(transparent)]
    AI(#[from] AIError),

    #[error("schema v{version}: {source}")]
    Schema {
        version: u32,
        #[source]
        source: SchemaViolation,
    },
}

/// Turns a free-text description into an [`ExtractionResult`].
///
/// One attempt per description. Every failure degrades to
/// [`ExtractionResult::fallback`]; nothing is raised to the caller.
pub struct Enricher<A: AI> {
    ai: A,
    temperature: f32,
    expiry_days: u32,
}

impl<A: AI> Enricher<A> {
    pub fn new(ai: A) -> Self {
        Self {
            ai,
            temperature: DEFAULT_TEMPERATURE,
            expiry_days: 7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expiry_days = days;
        self
    }

    pub fn ai(&self) -> &A {
        &self.ai
    }

    /// The completion request sent for a description.
    pub fn request(&self, description: &str) -> CompletionRequest {
        CompletionRequest::new(EXTRACT_SYSTEM_PROMPT, format_extract_prompt(description))
            .with_temperature(self.temperature)
            .json()
    }

    /// Enrich using the current date for the fallback expiry.
    pub async fn enrich(&self, description: &str) -> ExtractionResult {
        self.enrich_on(description, today()).await
    }

    /// Enrich with an explicit "today".
    pub async fn enrich_on(&self, description: &str, today: NaiveDate) -> ExtractionResult {
        match self.try_enrich(description).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "LLM extraction failed, using fallback");
                ExtractionResult::fallback(today, self.expiry_days)
            }
        }
    }

    async fn try_enrich(&self, description: &str) -> Result<ExtractionResult, EnrichError> {
        let request = self.request(description);
        let text = self.ai.complete(&request).await?;
        debug!(chars = text.len(), "Received extraction response");

        ExtractionResult::from_completion(&text).map_err(|source| EnrichError::Schema {
            version: SCHEMA_VERSION,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAI;
    use crate::types::Tag;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_call_failure_returns_fallback() {
        let enricher = Enricher::new(MockAI::new().with_failure("connection reset"));

        let result = enricher.enrich_on("Senior Rust engineer", day()).await;

        assert_eq!(result, ExtractionResult::fallback(day(), 7));
        assert_eq!(result.expires_at, "2024-06-08");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_fallback() {
        let enricher = Enricher::new(MockAI::new().with_response("{\"skills\": [\"Rust\""));

        let result = enricher.enrich_on("Senior Rust engineer", day()).await;

        assert_eq!(result, ExtractionResult::fallback(day(), 7));
    }

    #[tokio::test]
    async fn test_schema_violation_returns_fallback() {
        let enricher = Enricher::new(MockAI::new().with_response(r#"{"tags": ["Finance"]}"#));

        let result = enricher.enrich_on("Analyst", day()).await;

        assert_eq!(result, ExtractionResult::fallback(day(), 7));
    }

    #[tokio::test]
    async fn test_valid_response_passes_through() {
        let ai = MockAI::new()
            .with_response(r#"{"skills": ["SQL"], "minExperience": 2, "tags": ["Data Science"]}"#);
        let enricher = Enricher::new(ai);

        let result = enricher.enrich_on("Data Engineer", day()).await;

        assert_eq!(result.skills, vec!["SQL"]);
        assert_eq!(result.min_experience, 2);
        assert_eq!(result.tags, vec![Tag::DataScience]);
        assert_eq!(result.expires_at, "None");
    }

    #[tokio::test]
    async fn test_request_shape() {
        let ai = MockAI::new().with_response("{}");
        let enricher = Enricher::new(ai).with_temperature(0.2);

        enricher.enrich_on("Looking for a designer", day()).await;

        let calls = enricher.ai().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, EXTRACT_SYSTEM_PROMPT);
        assert!(calls[0].user.contains("Looking for a designer"));
        assert!(calls[0].json_mode);
        assert_eq!(calls[0].temperature, 0.2);
    }

    #[tokio::test]
    async fn test_fallback_uses_configured_expiry_days() {
        let enricher = Enricher::new(MockAI::new().with_failure("boom")).with_expiry_days(30);

        let result = enricher.enrich_on("x", day()).await;

        assert_eq!(result.expires_at, "2024-07-01");
    }
}
