//! Pagination over results pages.

use tracing::{info, warn};
use url::Url;

use super::Scraper;
use crate::error::SinkError;
use crate::traits::{Browser, Operator, RecordSink, AI};
use crate::types::{JobRecord, ScrapeConfig};

/// URL of the results page at `index` (0-based).
///
/// Every occurrence of the offset marker (`start=0`) is rewritten to
/// `start=index*page_size`. A base URL without the marker gets the offset
/// set as a query parameter instead, so pages still advance.
pub fn page_url(base_url: &str, index: usize, config: &ScrapeConfig) -> String {
    let offset = index * config.page_size;

    if base_url.contains(&config.offset_marker) {
        let replacement = format!("{}={}", config.offset_param, offset);
        return base_url.replace(&config.offset_marker, &replacement);
    }

    match Url::parse(base_url) {
        Ok(mut url) => {
            let pairs: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| key != config.offset_param.as_str())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(pairs)
                .append_pair(&config.offset_param, &offset.to_string());
            url.to_string()
        }
        Err(e) => {
            warn!(url = %base_url, error = %e, "Unparseable base URL; offset not applied");
            base_url.to_string()
        }
    }
}

/// Totals across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub listings_seen: usize,
    pub records: usize,
    pub failed: usize,
}

/// Records from a run plus its totals.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<JobRecord>,
    pub summary: RunSummary,
}

impl<B: Browser, A: AI, O: Operator> Scraper<B, A, O> {
    /// Scrape `page_count` consecutive results pages, in order.
    pub async fn walk(&self, base_url: &str, page_count: usize) -> RunReport {
        let mut report = RunReport::default();

        for index in 0..page_count {
            let url = page_url(base_url, index, &self.config);
            info!(page = index + 1, url = %url, "Scraping page {}", index + 1);

            let page = self.scrape_page(&url).await;
            report.summary.pages += 1;
            report.summary.listings_seen += page.listings_seen;
            report.summary.failed += page.failed;
            report.records.extend(page.records);
        }

        report.summary.records = report.records.len();
        info!(
            pages = report.summary.pages,
            records = report.summary.records,
            failed = report.summary.failed,
            "Run complete"
        );
        report
    }

    /// Scrape `page_count` pages and return the concatenated records.
    pub async fn run(&self, base_url: &str, page_count: usize) -> Vec<JobRecord> {
        self.walk(base_url, page_count).await.records
    }

    /// Walk the pages, then hand every record to an already opened sink.
    ///
    /// Opening the sink is the caller's job, so an unusable output fails
    /// before any page is scraped.
    pub async fn scrape_into(
        &self,
        base_url: &str,
        page_count: usize,
        sink: &mut dyn RecordSink,
    ) -> Result<RunSummary, SinkError> {
        let report = self.walk(base_url, page_count).await;
        sink.write_records(&report.records)?;
        Ok(report.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        MemorySink, MockAI, MockBrowser, MockElement, MockPage, ScriptedOperator,
    };

    const BASE: &str = "https://jobs.example/jobs?q=data+engineer&l=India&start=0";

    fn config() -> ScrapeConfig {
        ScrapeConfig::default().without_delays()
    }

    #[test]
    fn test_rewrites_marker() {
        let config = config();
        assert_eq!(page_url(BASE, 0, &config), BASE);
        assert_eq!(
            page_url(BASE, 2, &config),
            "https://jobs.example/jobs?q=data+engineer&l=India&start=20"
        );
    }

    #[test]
    fn test_marker_absent_sets_param() {
        let config = config();
        let url = page_url("https://jobs.example/jobs?q=rust", 1, &config);
        assert_eq!(url, "https://jobs.example/jobs?q=rust&start=10");
    }

    #[test]
    fn test_existing_nonzero_offset_is_replaced() {
        let config = config();
        let url = page_url("https://jobs.example/jobs?start=30&q=rust", 3, &config);
        assert_eq!(url, "https://jobs.example/jobs?q=rust&start=30");
    }

    #[test]
    fn test_unparseable_url_unchanged() {
        assert_eq!(page_url("not a url", 4, &config()), "not a url");
    }

    #[tokio::test]
    async fn test_walk_visits_pages_in_order() {
        let config = config();
        let mut browser = MockBrowser::new();
        for (index, title) in ["First", "Second", "Third"].into_iter().enumerate() {
            let listing = MockElement::new()
                .with_child(&config.selectors.title, MockElement::new().with_text(title));
            browser = browser.with_page(
                &page_url(BASE, index, &config),
                MockPage::new().with_element(&config.selectors.listing, listing),
            );
        }
        let ai = MockAI::new().with_default_response("{}");
        let scraper = Scraper::new(browser, ai, ScriptedOperator::new(), config.clone());

        let report = scraper.walk(BASE, 3).await;

        let titles: Vec<_> = report.records.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(
            scraper.browser().navigations(),
            vec![
                page_url(BASE, 0, &config),
                page_url(BASE, 1, &config),
                page_url(BASE, 2, &config),
            ]
        );
        assert_eq!(
            report.summary,
            RunSummary {
                pages: 3,
                listings_seen: 3,
                records: 3,
                failed: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_zero_pages_is_empty() {
        let scraper = Scraper::new(
            MockBrowser::new(),
            MockAI::new(),
            ScriptedOperator::new(),
            config(),
        );

        assert!(scraper.run(BASE, 0).await.is_empty());
        assert!(scraper.browser().navigations().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_into_writes_once() {
        let config = config();
        let listing = MockElement::new()
            .with_child(&config.selectors.title, MockElement::new().with_text("Only"));
        let browser = MockBrowser::new().with_page(
            BASE,
            MockPage::new().with_element(&config.selectors.listing, listing),
        );
        let ai = MockAI::new().with_default_response("{}");
        let scraper = Scraper::new(browser, ai, ScriptedOperator::new(), config);
        let mut sink = MemorySink::new();

        let summary = scraper.scrape_into(BASE, 1, &mut sink).await.unwrap();

        assert_eq!(summary.records, 1);
        assert_eq!(sink.writes, 1);
        assert_eq!(sink.records[0].job_title, "Only");
    }
}
