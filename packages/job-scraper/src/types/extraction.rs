//! The model's structured answer about one job description.
//!
//! The prompt and this module form a schema contract. Responses are parsed
//! into a loose wire payload, checked against the contract, then turned
//! into an [`ExtractionResult`]. Any violation is reported as a
//! [`SchemaViolation`] and handled by the caller exactly like a failed call.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::dates::default_expiry;
use super::record::NOT_SPECIFIED;
use super::tag::Tag;

/// Version of the prompt/response contract.
pub const SCHEMA_VERSION: u32 = 1;

/// Keys the model is asked to return.
pub const SCHEMA_KEYS: [&str; 9] = [
    "skills",
    "minExperience",
    "qualifications",
    "duration",
    "startDate",
    "expiresAt",
    "tags",
    "jobType",
    "employmentType",
];

/// Marker the model uses for "no value" in string fields.
pub const NONE_MARKER: &str = "None";

/// Structured fields derived from a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub skills: Vec<String>,
    pub min_experience: u32,
    pub qualifications: Vec<String>,
    pub duration: String,
    /// `yyyy-mm-dd` or [`NONE_MARKER`], as answered
    pub start_date: String,
    /// `yyyy-mm-dd` or [`NONE_MARKER`], as answered
    pub expires_at: String,
    pub tags: Vec<Tag>,
    pub job_type: String,
    pub employment_type: String,
}

impl ExtractionResult {
    /// The deterministic result used whenever enrichment fails.
    ///
    /// `expires_at` is already resolved to `today + expiry_days`.
    pub fn fallback(today: NaiveDate, expiry_days: u32) -> Self {
        let expires = default_expiry(today, expiry_days);
        Self {
            skills: Vec::new(),
            min_experience: 0,
            qualifications: Vec::new(),
            duration: NONE_MARKER.to_string(),
            start_date: NONE_MARKER.to_string(),
            expires_at: expires.format("%Y-%m-%d").to_string(),
            tags: Vec::new(),
            job_type: NOT_SPECIFIED.to_string(),
            employment_type: NOT_SPECIFIED.to_string(),
        }
    }

    /// Parse and validate a raw completion against the contract.
    pub fn from_completion(text: &str) -> Result<Self, SchemaViolation> {
        let body = openai_client::strip_code_blocks(text);
        let value: Value = serde_json::from_str(body).map_err(SchemaViolation::Json)?;

        let object = value.as_object().ok_or(SchemaViolation::NotAnObject)?;
        if !SCHEMA_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Err(SchemaViolation::NoKnownKeys);
        }

        let payload: ExtractionPayload =
            serde_json::from_value(value).map_err(SchemaViolation::Field)?;
        Ok(payload.into_result())
    }
}

/// Why a completion did not satisfy the contract.
#[derive(Debug, Error)]
pub enum SchemaViolation {
    #[error("response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response contains none of the expected keys")]
    NoKnownKeys,

    #[error("response field is malformed: {0}")]
    Field(#[source] serde_json::Error),
}

/// Wire shape of the response. Every key is optional and `null` is
/// accepted wherever a default exists.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionPayload {
    #[serde(default)]
    skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "whole_years")]
    min_experience: Option<u32>,
    #[serde(default)]
    qualifications: Option<Vec<String>>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    expires_at: Option<String>,
    #[serde(default)]
    tags: Option<Vec<Tag>>,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    employment_type: Option<String>,
}

impl ExtractionPayload {
    fn into_result(self) -> ExtractionResult {
        let mut tags = self.tags.unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        tags.retain(|t| seen.insert(*t));

        ExtractionResult {
            skills: self.skills.unwrap_or_default(),
            min_experience: self.min_experience.unwrap_or(0),
            qualifications: self.qualifications.unwrap_or_default(),
            duration: text_or(self.duration, NONE_MARKER),
            start_date: text_or(self.start_date, NONE_MARKER),
            expires_at: text_or(self.expires_at, NONE_MARKER),
            tags,
            job_type: text_or(self.job_type, NOT_SPECIFIED),
            employment_type: text_or(self.employment_type, NOT_SPECIFIED),
        }
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Accepts `2`, `2.0` or `"2"`; rejects negatives and fractions.
fn whole_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<Value>::deserialize(deserializer)?;
    let years = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 => f as u64,
                    _ => {
                        return Err(D::Error::custom(format!(
                            "minExperience {} is not a whole number of years",
                            n
                        )))
                    }
                }
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("minExperience {:?} is not a number", s)))?,
        Some(other) => {
            return Err(D::Error::custom(format!(
                "minExperience has unexpected type: {}",
                other
            )))
        }
    };

    u32::try_from(years)
        .map(Some)
        .map_err(|_| D::Error::custom("minExperience out of range"))
}
