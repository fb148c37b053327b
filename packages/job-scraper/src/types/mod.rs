//! Data types for the scraping pipeline.

pub mod config;
pub mod dates;
pub mod extraction;
pub mod record;
pub mod tag;

pub use config::{ChallengeMarkers, ScrapeConfig, Selectors};
pub use extraction::{ExtractionResult, SchemaViolation, SCHEMA_KEYS, SCHEMA_VERSION};
pub use record::{JobRecord, ListingFields, NOT_AVAILABLE, NOT_SPECIFIED};
pub use tag::Tag;
