//! Controlled tag vocabulary for job records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topical tag. The model may only answer with these values; anything else
/// fails schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    Software,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Data Science")]
    DataScience,
    Design,
    Marketing,
    Consulting,
    Business,
}

impl Tag {
    /// Every tag, in prompt order.
    pub const ALL: [Tag; 7] = [
        Tag::Software,
        Tag::AiMl,
        Tag::DataScience,
        Tag::Design,
        Tag::Marketing,
        Tag::Consulting,
        Tag::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Software => "Software",
            Tag::AiMl => "AI/ML",
            Tag::DataScience => "Data Science",
            Tag::Design => "Design",
            Tag::Marketing => "Marketing",
            Tag::Consulting => "Consulting",
            Tag::Business => "Business",
        }
    }

    /// Python-style list literal used in the prompt, e.g. `['Software', 'AI/ML']`.
    pub fn vocabulary_literal() -> String {
        let quoted: Vec<String> = Self::ALL.iter().map(|t| format!("'{}'", t)).collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
