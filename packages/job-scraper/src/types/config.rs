//! Configuration for the scraping pipeline.

use std::time::Duration;

/// CSS selectors for the results page layout.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// One element per job listing on the results page.
    pub listing: String,
    /// Listing-scoped title element.
    pub title: String,
    /// Listing-scoped company name.
    pub company: String,
    /// Listing-scoped location text.
    pub location: String,
    /// Listing-scoped logo image.
    pub logo: String,
    /// Listing-scoped attribute snippets (salary, shift, ...).
    pub snippet: String,
    /// Page-scoped description in the detail panel.
    pub description: String,
    /// Page-scoped candidate apply buttons.
    pub apply_button: String,
    /// Page-scoped embedded frames.
    pub frame: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            listing: ".job_seen_beacon".to_string(),
            title: r#"span[id^="jobTitle-"]"#.to_string(),
            company: r#"span[data-testid="company-name"]"#.to_string(),
            location: r#"div[data-testid="text-location"]"#.to_string(),
            logo: "img".to_string(),
            snippet: r#"div[data-testid="attribute_snippet_testid"]"#.to_string(),
            description: "#jobDescriptionText".to_string(),
            apply_button: "button".to_string(),
            frame: "iframe".to_string(),
        }
    }
}

/// Markers identifying a bot-verification widget.
#[derive(Debug, Clone)]
pub struct ChallengeMarkers {
    /// Substring of an iframe `src` that indicates a challenge.
    pub frame_src: String,
    /// Elements whose id or class contains a widget marker.
    pub widget_selector: String,
}

impl Default for ChallengeMarkers {
    fn default() -> Self {
        Self {
            frame_src: "captcha".to_string(),
            widget_selector: r#"[id*="px-captcha"], [class*="g-recaptcha"]"#.to_string(),
        }
    }
}

/// Configuration for one scraping run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Pause after navigating to a results page.
    ///
    /// Default: 4s.
    pub page_settle: Duration,

    /// Pause after clicking a listing open.
    ///
    /// Default: 3s.
    pub click_settle: Duration,

    /// Pause after an operator resolves a challenge.
    ///
    /// Default: 2s.
    pub challenge_settle: Duration,

    /// Upper bound on waiting for the description panel.
    ///
    /// Default: 10s.
    pub description_timeout: Duration,

    /// Poll interval for bounded element waits.
    pub poll_interval: Duration,

    /// Listings per results page; the offset step.
    pub page_size: usize,

    /// Literal offset marker rewritten in the base URL.
    pub offset_marker: String,

    /// Query parameter used when the marker is absent.
    pub offset_param: String,

    /// Value of the `sourceType` column.
    pub source_type: String,

    /// Days added to today when no expiry date is known.
    pub expiry_days: u32,

    /// Text markers identifying the salary snippet.
    pub salary_markers: Vec<String>,

    pub selectors: Selectors,

    pub challenge: ChallengeMarkers,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            page_settle: Duration::from_secs(4),
            click_settle: Duration::from_secs(3),
            challenge_settle: Duration::from_secs(2),
            description_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
            page_size: 10,
            offset_marker: "start=0".to_string(),
            offset_param: "start".to_string(),
            source_type: "company".to_string(),
            expiry_days: 7,
            salary_markers: vec![
                "₹".to_string(),
                "per month".to_string(),
                "per year".to_string(),
            ],
            selectors: Selectors::default(),
            challenge: ChallengeMarkers::default(),
        }
    }
}

impl ScrapeConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every pacing delay. Bounded waits still poll once.
    pub fn without_delays(mut self) -> Self {
        self.page_settle = Duration::ZERO;
        self.click_settle = Duration::ZERO;
        self.challenge_settle = Duration::ZERO;
        self.description_timeout = Duration::ZERO;
        self.poll_interval = Duration::ZERO;
        self
    }

    pub fn with_description_timeout(mut self, timeout: Duration) -> Self {
        self.description_timeout = timeout;
        self
    }
}
