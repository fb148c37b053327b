//! Integration tests for a full scraping run.
//!
//! These tests drive the whole flow against scripted pages:
//! 1. Log in
//! 2. Walk results pages in order
//! 3. Extract and enrich every listing
//! 4. Write records to a sink

use job_scraper::pipeline::{page_url, DEFAULT_LOGIN_URL};
use job_scraper::sinks::CsvSink;
use job_scraper::testing::{
    MemorySink, MockAI, MockBrowser, MockElement, MockPage, ScriptedOperator,
};
use job_scraper::types::{NOT_AVAILABLE, NOT_SPECIFIED};
use job_scraper::{JobRecord, RecordSink, ScrapeConfig, Scraper, Tag};

const BASE: &str = "https://in.jobs.example/jobs?q=data+engineer&l=India&start=0";

fn config() -> ScrapeConfig {
    ScrapeConfig::default().without_delays()
}

/// Helper to create a listing card whose click opens `description`.
fn card(title: &str, company: &str, description: &str) -> MockElement {
    let s = config().selectors;
    MockElement::new()
        .with_text(title)
        .with_child(&s.title, MockElement::new().with_text(title))
        .with_child(&s.company, MockElement::new().with_text(company))
        .with_child(&s.location, MockElement::new().with_text("Bengaluru, Karnataka"))
        .with_child(
            &s.logo,
            MockElement::new()
                .with_attribute("src", format!("https://logos.example/{}.png", company)),
        )
        .with_child(&s.snippet, MockElement::new().with_text("₹15,00,000 per year"))
        .on_click(&s.description, MockElement::new().with_text(description))
}

fn enriched(skills: &[&str], years: u32, tags: &[&str]) -> String {
    serde_json::json!({
        "skills": skills,
        "minExperience": years,
        "qualifications": ["Bachelor's degree"],
        "duration": "None",
        "startDate": "None",
        "expiresAt": "2099-12-31",
        "tags": tags,
        "jobType": "Full-time",
        "employmentType": "On-site"
    })
    .to_string()
}

/// Helper to build a scraper over pages keyed by index.
fn scraper_over(
    pages: Vec<MockPage>,
    ai: MockAI,
) -> Scraper<MockBrowser, MockAI, ScriptedOperator> {
    let config = config();
    let mut browser = MockBrowser::new();
    for (index, page) in pages.into_iter().enumerate() {
        browser = browser.with_page(&page_url(BASE, index, &config), page);
    }
    Scraper::new(browser, ai, ScriptedOperator::new(), config)
}

#[tokio::test]
async fn test_end_to_end_single_listing() {
    let page = MockPage::new().with_element(
        ".job_seen_beacon",
        card("Data Engineer", "Acme", "Build batch pipelines in SQL and Airflow"),
    );
    let ai = MockAI::new().with_response_for(
        "batch pipelines",
        enriched(&["SQL", "Airflow"], 2, &["Data Science"]),
    );
    let scraper = scraper_over(vec![page], ai);

    scraper.login(DEFAULT_LOGIN_URL).await.unwrap();
    let records = scraper.run(BASE, 1).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.source_type, "company");
    assert_eq!(record.job_title, "Data Engineer");
    assert_eq!(record.company_name, "Acme");
    assert_eq!(record.company_logo, "https://logos.example/Acme.png");
    assert_eq!(record.location, "Bengaluru, Karnataka");
    assert_eq!(record.salary_range, "₹15,00,000 per year");
    assert_eq!(record.job_description, "Build batch pipelines in SQL and Airflow");
    assert_eq!(record.skills, vec!["SQL", "Airflow"]);
    assert_eq!(record.min_experience, 2);
    assert_eq!(record.tags, vec![Tag::DataScience]);
    assert_eq!(record.job_type, "Full-time");
    assert_eq!(record.employment_type, "On-site");
    assert_eq!(record.start_date, None);
    assert_eq!(record.expires_at.to_string(), "2099-12-31");
    assert_eq!(record.external_link, BASE);

    assert_eq!(
        scraper.browser().navigations(),
        vec![DEFAULT_LOGIN_URL.to_string(), BASE.to_string()]
    );
}

#[tokio::test]
async fn test_one_failing_listing_of_five() {
    let s = config().selectors;
    let mut page = MockPage::new();
    for n in 1..=5 {
        let listing = card(&format!("Role {}", n), "Acme", &format!("desc {}", n));
        let listing = if n == 3 {
            listing.with_child_failure(&s.title, "Node is detached from document")
        } else {
            listing
        };
        page = page.with_element(".job_seen_beacon", listing);
    }
    let ai = MockAI::new().with_default_response(enriched(&[], 0, &[]));
    let scraper = scraper_over(vec![page], ai);

    let report = scraper.walk(BASE, 1).await;

    let titles: Vec<_> = report.records.iter().map(|r| r.job_title.as_str()).collect();
    assert_eq!(titles, vec!["Role 1", "Role 2", "Role 4", "Role 5"]);
    assert_eq!(report.summary.listings_seen, 5);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.records, 4);

    // the broken listing is abandoned before it is opened
    assert_eq!(
        scraper.browser().clicks(),
        vec!["Role 1", "Role 2", "Role 4", "Role 5"]
    );
}

#[tokio::test]
async fn test_missing_fields_do_not_affect_others() {
    let s = config().selectors;
    let listing = MockElement::new()
        .with_child(&s.title, MockElement::new().with_text("ML Intern"))
        .with_child(&s.company, MockElement::new().with_text("Lab"))
        .with_child(&s.snippet, MockElement::new().with_text("Internship"))
        .on_click(&s.description, MockElement::new().with_text("Train models"));
    let page = MockPage::new().with_element(".job_seen_beacon", listing);
    let ai = MockAI::new().with_response(enriched(&["PyTorch"], 0, &["AI/ML"]));
    let scraper = scraper_over(vec![page], ai);

    let records = scraper.run(BASE, 1).await;

    let record = &records[0];
    assert_eq!(record.job_title, "ML Intern");
    assert_eq!(record.company_name, "Lab");
    assert_eq!(record.company_logo, NOT_AVAILABLE);
    assert_eq!(record.location, NOT_SPECIFIED);
    assert_eq!(record.salary_range, NOT_SPECIFIED);
    assert_eq!(record.job_description, "Train models");
    assert_eq!(record.tags, vec![Tag::AiMl]);
}

#[tokio::test]
async fn test_pages_walked_in_offset_order() {
    let pages = vec![
        MockPage::new().with_element(".job_seen_beacon", card("A", "One", "first page")),
        MockPage::new().with_element(".job_seen_beacon", card("B", "Two", "second page")),
        MockPage::new().with_element(".job_seen_beacon", card("C", "Three", "third page")),
    ];
    let ai = MockAI::new().with_default_response(enriched(&[], 0, &[]));
    let scraper = scraper_over(pages, ai);

    let records = scraper.run(BASE, 3).await;

    let titles: Vec<_> = records.iter().map(|r| r.job_title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    let navigations = scraper.browser().navigations();
    assert!(navigations[0].ends_with("start=0"));
    assert!(navigations[1].ends_with("start=10"));
    assert!(navigations[2].ends_with("start=20"));
}

#[tokio::test]
async fn test_description_timeout_and_enrichment_failure() {
    let s = config().selectors;
    let listing =
        MockElement::new().with_child(&s.title, MockElement::new().with_text("Consultant"));
    let page = MockPage::new().with_element(".job_seen_beacon", listing);
    let ai = MockAI::new().with_failure("503 Service Unavailable");
    let scraper = scraper_over(vec![page], ai);

    let records = scraper.run(BASE, 1).await;

    let record = &records[0];
    assert_eq!(record.job_description, NOT_AVAILABLE);
    assert!(record.skills.is_empty());
    assert_eq!(record.min_experience, 0);
    assert_eq!(record.job_type, NOT_SPECIFIED);
    assert_eq!(record.employment_type, NOT_SPECIFIED);
    assert_eq!(record.duration, "None");
    assert_eq!(
        record.expires_at,
        job_scraper::pipeline::today() + chrono::Duration::days(7)
    );
}

#[tokio::test]
async fn test_challenge_blocks_on_operator() {
    let page = MockPage::new()
        .with_element(".job_seen_beacon", card("Designer", "Studio", "Figma work"))
        .with_element(
            "iframe",
            MockElement::new().with_attribute("src", "https://captcha.example/challenge"),
        );
    let ai = MockAI::new().with_default_response(enriched(&[], 0, &["Design"]));
    let scraper = scraper_over(vec![page], ai);

    let records = scraper.run(BASE, 1).await;

    assert_eq!(records.len(), 1);
    assert!(!scraper.operator().instructions().is_empty());
    assert!(scraper
        .operator()
        .instructions()
        .iter()
        .all(|i| i.contains("CAPTCHA")));
}

#[tokio::test]
async fn test_records_reach_sinks() {
    let page = MockPage::new()
        .with_element(".job_seen_beacon", card("Analyst", "Acme", "Reports, dashboards"))
        .with_element(".job_seen_beacon", card("Marketer", "Brand", "Campaigns"));
    let ai = MockAI::new().with_default_response(enriched(&["Excel"], 1, &["Business"]));
    let scraper = scraper_over(vec![page], ai);
    let records = scraper.run(BASE, 1).await;

    let mut memory = MemorySink::new();
    memory.write_records(&records).unwrap();
    assert_eq!(memory.records, records);

    let mut csv = CsvSink::new(Vec::new());
    csv.write_records(&records).unwrap();
    let text = String::from_utf8(csv.into_inner()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], JobRecord::COLUMNS.join(","));
    assert!(lines[1].contains("Analyst"));
    assert!(lines[1].contains("\"Reports, dashboards\""));
    assert!(lines[2].starts_with("company,Brand,"));
}
