//! LLM prompts for description enrichment.
//!
//! The user prompt and [`crate::types::extraction`] are one contract; bump
//! [`crate::types::SCHEMA_VERSION`] when either changes.

use crate::types::Tag;

/// System instruction for the enrichment call.
pub const EXTRACT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that extracts structured data.";

/// Prompt for extracting structured fields from a job description.
pub const EXTRACT_DETAILS_PROMPT: &str = r#"You are an intelligent parser. Given the following job description, extract:

- Required skills (as a list)
- Minimum experience in years (number only)
- Qualifications (as a list)
- Duration (e.g. "6 months", "1 year", or "None" if not specified)
- Start date if mentioned (in yyyy-mm-dd format if possible, otherwise "None")
- Expiration date if mentioned (in yyyy-mm-dd format if possible, otherwise "None")
- Tags: Choose only from {tags}
- Job Type (Full-time, Internship, Contract, etc.)
- Employment Type (Remote, On-site, Hybrid)

Job Description:
"""
{description}
"""

Respond only in this JSON format (no extra text):

{
  "skills": [],
  "minExperience": 0,
  "qualifications": [],
  "duration": "None",
  "startDate": "None",
  "expiresAt": "None",
  "tags": [],
  "jobType": "Not specified",
  "employmentType": "Not specified"
}"#;

/// Format the enrichment prompt for one description.
///
/// The description is embedded verbatim.
pub fn format_extract_prompt(description: &str) -> String {
    EXTRACT_DETAILS_PROMPT
        .replace("{tags}", &Tag::vocabulary_literal())
        .replace("{description}", description)
}
