//! Job scraper CLI
//!
//! Opens a visible Chromium window, waits for the operator to log in, walks
//! the search results, and writes the enriched records to disk.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_scraper::ai::OpenAI;
use job_scraper::browser::{BrowserSettings, ChromiumBrowser};
use job_scraper::operators::ConsoleOperator;
use job_scraper::pipeline::DEFAULT_LOGIN_URL;
use job_scraper::sinks::{create_sink, OutputFormat};
use job_scraper::{LlmConfig, RecordSink, RunSummary, ScrapeConfig, Scraper};

const DEFAULT_SEARCH_URL: &str = "https://in.indeed.com/jobs?q=data+engineer&l=India&sc=0kf%3Aattr%287EQCZ%7CVDTG7%252COR%29%3B&from=searchOnDesktopSerp&start=0vjk%3Daa8d08738f6f213e&vjk=aa8d08738f6f213e";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "job-scraper")]
#[command(about = "Scrape job listings and enrich them with an LLM")]
struct Cli {
    /// Search results URL; its `start=0` marker is advanced per page
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    url: String,

    /// Number of results pages to walk
    #[arg(long, default_value_t = 2)]
    pages: usize,

    /// Output file
    #[arg(long, default_value = "indeed_jobs.csv")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Run the browser without a window (challenges cannot be solved)
    #[arg(long)]
    headless: bool,

    /// Skip the manual login step
    #[arg(long)]
    skip_login: bool,

    /// Login page opened before scraping
    #[arg(long, default_value = DEFAULT_LOGIN_URL)]
    login_url: String,

    /// Chrome/Chromium executable
    #[arg(long)]
    chrome: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let llm = LlmConfig::from_env().context("Failed to load LLM configuration")?;
    tracing::info!(model = %llm.model, base_url = %llm.base_url, "Using completion endpoint");

    // Open the output before the run so a bad path fails before scraping
    let mut sink = create_sink(&cli.output, cli.format.into())
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;

    let settings = BrowserSettings {
        headless: cli.headless,
        chrome_path: cli.chrome.clone(),
        ..BrowserSettings::default()
    };
    let browser = ChromiumBrowser::launch(&settings)
        .await
        .context("Failed to launch browser")?;

    let scraper = Scraper::new(
        browser,
        OpenAI::from_config(&llm),
        ConsoleOperator::new(),
        ScrapeConfig::default(),
    )
    .with_temperature(llm.temperature);

    let outcome = scrape(&scraper, &cli, sink.as_mut()).await;
    scraper.into_browser().close().await;
    let summary = outcome?;

    print_summary(&summary, &cli.output);
    Ok(())
}

async fn scrape(
    scraper: &Scraper<ChromiumBrowser, OpenAI, ConsoleOperator>,
    cli: &Cli,
    sink: &mut dyn RecordSink,
) -> Result<RunSummary> {
    if !cli.skip_login {
        scraper.login(&cli.login_url).await.context("Login failed")?;
    }

    scraper
        .scrape_into(&cli.url, cli.pages, sink)
        .await
        .with_context(|| format!("Failed to write {}", cli.output.display()))
}

fn print_summary(summary: &RunSummary, output: &std::path::Path) {
    println!();
    println!(
        "{} {} jobs saved to {}",
        style("✔").green(),
        style(summary.records).bold(),
        style(output.display()).cyan()
    );
    println!(
        "  {} pages, {} listings seen, {} skipped",
        summary.pages, summary.listings_seen, summary.failed
    );
}
