//! Results-page and per-listing extraction.
//!
//! A field that cannot be found degrades to its sentinel without touching
//! the other fields. Logo and salary lookups degrade on any error. Any
//! other failure while handling a listing abandons that listing only; the
//! page moves on to the next one.

use tracing::{debug, error, info, warn};

use super::normalize::{normalize_date, resolve_expiry, today};
use super::{pace, Scraper};
use crate::error::{BrowserError, BrowserResult};
use crate::traits::{Browser, Element, Operator, AI};
use crate::types::{JobRecord, ListingFields, NOT_AVAILABLE, NOT_SPECIFIED};

/// Outcome of scraping one results page.
#[derive(Debug, Default)]
pub struct PageReport {
    /// Finished records in listing order
    pub records: Vec<JobRecord>,

    /// Listings found on the page
    pub listings_seen: usize,

    /// Listings abandoned after an error
    pub failed: usize,
}

/// Map a lookup miss to `None`, leaving real driver errors in place.
fn optional<T>(result: BrowserResult<T>) -> BrowserResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Trimmed text of a listing-scoped child, or `fallback` when absent.
async fn child_text<E: Element>(
    listing: &E,
    selector: &str,
    fallback: &str,
) -> BrowserResult<String> {
    let text = match optional(listing.find_element(selector).await)? {
        Some(element) => element.text().await?,
        None => return Ok(fallback.to_string()),
    };
    let text = text.trim();
    if text.is_empty() {
        Ok(fallback.to_string())
    } else {
        Ok(text.to_string())
    }
}

impl<B: Browser, A: AI, O: Operator> Scraper<B, A, O> {
    /// Scrape every listing on one results page.
    ///
    /// Never fails: a page that cannot be loaded yields no records.
    pub async fn extract_page(&self, page_url: &str) -> Vec<JobRecord> {
        self.scrape_page(page_url).await.records
    }

    /// Scrape one results page, keeping listing counts.
    pub async fn scrape_page(&self, page_url: &str) -> PageReport {
        let mut report = PageReport::default();

        if let Err(e) = self.browser.navigate(page_url).await {
            error!(url = %page_url, error = %e, "Failed to load results page");
            return report;
        }
        pace(self.config.page_settle).await;
        self.check_and_wait().await;

        let listings = match self
            .browser
            .find_elements(&self.config.selectors.listing)
            .await
        {
            Ok(listings) => listings,
            Err(e) => {
                error!(url = %page_url, error = %e, "Failed to locate listings");
                return report;
            }
        };
        report.listings_seen = listings.len();
        info!(count = listings.len(), "Found {} jobs", listings.len());

        for (index, listing) in listings.iter().enumerate() {
            match self.scrape_listing(listing, page_url).await {
                Ok(record) => {
                    info!("Scraped: {} @ {}", record.job_title, record.company_name);
                    report.records.push(record);
                }
                Err(e) => {
                    error!(index, error = %e, "Error scraping job");
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Extract one listing into a finished record.
    async fn scrape_listing(
        &self,
        listing: &B::Element,
        page_url: &str,
    ) -> BrowserResult<JobRecord> {
        let selectors = &self.config.selectors;

        let title = child_text(listing, &selectors.title, NOT_AVAILABLE).await?;
        let company = child_text(listing, &selectors.company, NOT_AVAILABLE).await?;
        let location = child_text(listing, &selectors.location, NOT_SPECIFIED).await?;
        let logo = self.logo(listing).await;
        let salary = self.salary(listing).await;

        self.check_and_wait().await;
        listing.click().await?;
        pace(self.config.click_settle).await;
        self.check_and_wait().await;

        let description = self.description().await?;
        let external_link = self.apply_link(page_url).await?;

        let fields = ListingFields {
            title,
            company,
            location,
            logo,
            salary,
            description,
            external_link,
        };

        let extraction = self.enricher.enrich(&fields.description).await;
        let today = today();
        let start_date = normalize_date(&extraction.start_date);
        let expires_at = resolve_expiry(&extraction.expires_at, today, self.config.expiry_days);
        debug!(?start_date, %expires_at, "Resolved dates");

        Ok(JobRecord::assemble(
            self.config.source_type.clone(),
            fields,
            extraction,
            start_date,
            expires_at,
        ))
    }

    /// `src` of the listing's logo image.
    ///
    /// Never fails: any lookup error degrades to the sentinel.
    async fn logo(&self, listing: &B::Element) -> String {
        match self.find_logo(listing).await {
            Ok(Some(src)) => src,
            Ok(None) => NOT_AVAILABLE.to_string(),
            Err(e) => {
                warn!(error = %e, "Logo lookup failed");
                NOT_AVAILABLE.to_string()
            }
        }
    }

    async fn find_logo(&self, listing: &B::Element) -> BrowserResult<Option<String>> {
        let Some(image) = optional(listing.find_element(&self.config.selectors.logo).await)? else {
            return Ok(None);
        };
        Ok(image
            .attribute("src")
            .await?
            .filter(|src| !src.trim().is_empty()))
    }

    /// First attribute snippet that mentions a salary marker.
    ///
    /// Never fails: any lookup error degrades to the sentinel.
    async fn salary(&self, listing: &B::Element) -> String {
        match self.find_salary(listing).await {
            Ok(Some(salary)) => salary,
            Ok(None) => NOT_SPECIFIED.to_string(),
            Err(e) => {
                warn!(error = %e, "Salary lookup failed");
                NOT_SPECIFIED.to_string()
            }
        }
    }

    async fn find_salary(&self, listing: &B::Element) -> BrowserResult<Option<String>> {
        for snippet in listing.find_elements(&self.config.selectors.snippet).await? {
            let text = snippet.text().await?;
            let text = text.trim();
            if self
                .config
                .salary_markers
                .iter()
                .any(|marker| text.contains(marker.as_str()))
            {
                return Ok(Some(text.to_string()));
            }
        }
        Ok(None)
    }

    /// Description text from the detail panel, waiting for it to render.
    async fn description(&self) -> BrowserResult<String> {
        let waited = self
            .browser
            .wait_for_element(
                &self.config.selectors.description,
                self.config.description_timeout,
                self.config.poll_interval,
            )
            .await;

        match waited {
            Ok(panel) => {
                let text = panel.text().await?;
                let text = text.trim();
                if text.is_empty() {
                    Ok(NOT_AVAILABLE.to_string())
                } else {
                    Ok(text.to_string())
                }
            }
            Err(BrowserError::Timeout { selector }) => {
                warn!(%selector, "Description did not load in time");
                Ok(NOT_AVAILABLE.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply target: an external apply button link, else the current page.
    ///
    /// Falls back to the results page URL if the lookup itself fails.
    async fn apply_link(&self, page_url: &str) -> BrowserResult<String> {
        match self.find_apply_href().await {
            Ok(Some(href)) => return Ok(href),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Apply link lookup failed");
                return Ok(page_url.to_string());
            }
        }

        match self.browser.current_url().await {
            Ok(url) => Ok(url),
            Err(e) => {
                warn!(error = %e, "Could not read current URL");
                Ok(page_url.to_string())
            }
        }
    }

    async fn find_apply_href(&self) -> BrowserResult<Option<String>> {
        let buttons = self
            .browser
            .find_elements(&self.config.selectors.apply_button)
            .await?;

        for button in buttons {
            let label = button.text().await?;
            if !label.to_lowercase().contains("apply") {
                continue;
            }
            if let Some(href) = button.attribute("href").await? {
                if href.starts_with("http") {
                    return Ok(Some(href));
                }
            }
        }
        Ok(None)
    }
}
