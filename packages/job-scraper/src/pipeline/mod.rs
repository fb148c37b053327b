//! Scraping pipeline.
//!
//! ```text
//! Scraper::walk ─▶ extract_page (per results page)
//!                    └─▶ scrape_listing (per listing)
//!                          ├─▶ check_and_wait (challenge checkpoints)
//!                          ├─▶ Enricher::enrich
//!                          └─▶ normalize_date / resolve_expiry
//! ```
//!
//! Everything runs sequentially on one browser session.

pub mod enrich;
pub mod interstitial;
pub mod listing;
pub mod login;
pub mod normalize;
pub mod prompts;
pub mod walker;

pub use enrich::{Enricher, DEFAULT_TEMPERATURE};
pub use interstitial::{check_and_wait, detect_challenge, ChallengeKind};
pub use listing::PageReport;
pub use login::DEFAULT_LOGIN_URL;
pub use normalize::{normalize_date, resolve_expiry, today};
pub use walker::{page_url, RunReport, RunSummary};

use std::time::Duration;

use crate::traits::{Browser, Operator, AI};
use crate::types::ScrapeConfig;

/// Fixed-duration pause letting dynamic content settle.
pub(crate) async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Owns the browser session and drives the pipeline over it.
pub struct Scraper<B: Browser, A: AI, O: Operator> {
    browser: B,
    enricher: Enricher<A>,
    operator: O,
    config: ScrapeConfig,
}

impl<B: Browser, A: AI, O: Operator> Scraper<B, A, O> {
    pub fn new(browser: B, ai: A, operator: O, config: ScrapeConfig) -> Self {
        let enricher = Enricher::new(ai).with_expiry_days(config.expiry_days);
        Self {
            browser,
            enricher,
            operator,
            config,
        }
    }

    /// Override the enrichment sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.enricher = self.enricher.with_temperature(temperature);
        self
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn enricher(&self) -> &Enricher<A> {
        &self.enricher
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Release the browser session (e.g. to close it).
    pub fn into_browser(self) -> B {
        self.browser
    }

    /// Challenge checkpoint on the current page.
    pub async fn check_and_wait(&self) -> bool {
        check_and_wait(&self.browser, &self.operator, &self.config).await
    }
}
