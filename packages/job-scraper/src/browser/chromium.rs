//! Chromium session over the DevTools protocol.
//!
//! # Example
//!
//! ```rust,ignore
//! use job_scraper::browser::{BrowserSettings, ChromiumBrowser};
//!
//! let browser = ChromiumBrowser::launch(&BrowserSettings::default()).await?;
//! browser.navigate("https://example.com").await?;
//! browser.close().await;
//! ```

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::element::Element as CdpElement;
use chromiumoxide::{Handler, Page};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{BrowserError, BrowserResult};
use crate::traits::{Browser, Element};

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Run without a window. Challenges and login need a visible window.
    pub headless: bool,

    /// Window size in pixels.
    pub window: (u32, u32),

    /// Explicit Chrome/Chromium binary; autodetected when `None`.
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            window: (1920, 1080),
            chrome_path: None,
        }
    }
}

impl BrowserSettings {
    fn to_config(&self) -> BrowserResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.window.0, self.window.1)
            .arg("--start-maximized")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(BrowserError::Launch)
    }
}

/// One Chromium process with a single active page.
pub struct ChromiumBrowser {
    browser: CdpBrowser,
    page: Page,
    handler_task: JoinHandle<()>,
}

fn spawn_handler_task(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                warn!("chromiumoxide handler event error: {}", e);
            }
        }
        debug!("chromiumoxide handler stopped");
    })
}

impl ChromiumBrowser {
    /// Start the browser and open a blank page.
    pub async fn launch(settings: &BrowserSettings) -> BrowserResult<Self> {
        let config = settings.to_config()?;
        let (browser, handler) = CdpBrowser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        let handler_task = spawn_handler_task(handler);

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        info!(headless = settings.headless, "Browser launched");
        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Close the browser and stop the event handler.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Failed to close browser cleanly");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Failed to wait for browser exit");
        }
        self.handler_task.abort();
        info!("Browser closed");
    }
}

#[async_trait]
impl Browser for ChromiumBrowser {
    type Element = ChromiumElement;

    async fn navigate(&self, url: &str) -> BrowserResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> BrowserResult<String> {
        self.page
            .url()
            .await
            .map_err(BrowserError::driver)?
            .ok_or_else(|| BrowserError::driver(std::io::Error::other("page has no URL")))
    }

    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<ChromiumElement>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(BrowserError::driver)?;
        Ok(elements.into_iter().map(ChromiumElement).collect())
    }
}

/// An element on the active page.
pub struct ChromiumElement(CdpElement);

#[async_trait]
impl Element for ChromiumElement {
    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<Self>> {
        let elements = self
            .0
            .find_elements(selector)
            .await
            .map_err(BrowserError::driver)?;
        Ok(elements.into_iter().map(ChromiumElement).collect())
    }

    async fn text(&self) -> BrowserResult<String> {
        Ok(self
            .0
            .inner_text()
            .await
            .map_err(BrowserError::driver)?
            .unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> BrowserResult<Option<String>> {
        self.0.attribute(name).await.map_err(BrowserError::driver)
    }

    async fn click(&self) -> BrowserResult<()> {
        self.0.click().await.map_err(BrowserError::driver)?;
        Ok(())
    }
}
