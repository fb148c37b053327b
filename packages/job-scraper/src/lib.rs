//! Job Listing Scraper
//!
//! Walks paginated job-search results in a real browser, reads each
//! listing's fields, enriches the description through an LLM, and emits
//! schema-complete records.
//!
//! # Design
//!
//! - One browser session, strictly sequential
//! - A human operator handles login and bot-verification challenges
//! - Every record is complete: missing values become explicit sentinels
//! - A failing listing is skipped; the page keeps going
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_scraper::{Scraper, ScrapeConfig};
//! use job_scraper::testing::{MockAI, MockBrowser, ScriptedOperator};
//!
//! let scraper = Scraper::new(
//!     MockBrowser::new(),
//!     MockAI::new(),
//!     ScriptedOperator::new(),
//!     ScrapeConfig::default(),
//! );
//! let records = scraper.run("https://jobs.example/jobs?q=rust&start=0", 3).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability traits (Browser, AI, Operator, RecordSink)
//! - [`types`] - Records, extraction results, configuration
//! - [`pipeline`] - Page walker, listing extractor, enrichment, challenges
//! - [`ai`] - OpenAI-compatible completion backend
//! - [`browser`] - Chromium session (feature `chromium`)
//! - [`operators`] - Terminal operator
//! - [`sinks`] - CSV and JSON output
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod browser;
pub mod config;
pub mod error;
pub mod operators;
pub mod pipeline;
pub mod sinks;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::LlmConfig;
pub use error::{
    AIError, BrowserError, ConfigError, OperatorError, Result, ScrapeError, SinkError,
};
pub use pipeline::{Enricher, PageReport, RunReport, RunSummary, Scraper};
pub use traits::{Browser, CompletionRequest, Element, Operator, RecordSink, AI};
pub use types::{ExtractionResult, JobRecord, ScrapeConfig, Tag};
