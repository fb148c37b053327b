//! Browser automation capability.
//!
//! A [`Browser`] is one exclusively owned session with a single active page.
//! Locators are CSS selectors. Only [`BrowserError::NotFound`] means "the
//! page lacks this element"; every other error is a driver fault.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{BrowserError, BrowserResult};

/// Lower bound on the polling interval of bounded waits.
const MIN_POLL: Duration = Duration::from_millis(10);

/// A handle to one element on the current page.
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// All descendants matching the selector (possibly empty).
    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<Self>>;

    /// First descendant matching the selector.
    async fn find_element(&self, selector: &str) -> BrowserResult<Self> {
        self.find_elements(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::not_found(selector))
    }

    /// Rendered text content.
    async fn text(&self) -> BrowserResult<String>;

    /// Attribute value, `None` when the attribute is not set.
    async fn attribute(&self, name: &str) -> BrowserResult<Option<String>>;

    /// Click the element.
    async fn click(&self) -> BrowserResult<()>;
}

/// An automation session.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Element;

    /// Load a URL in the active page.
    async fn navigate(&self, url: &str) -> BrowserResult<()>;

    /// URL of the active page.
    async fn current_url(&self) -> BrowserResult<String>;

    /// All elements on the page matching the selector (possibly empty).
    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<Self::Element>>;

    /// First element on the page matching the selector.
    async fn find_element(&self, selector: &str) -> BrowserResult<Self::Element> {
        self.find_elements(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::not_found(selector))
    }

    /// Poll until an element matching the selector is present.
    ///
    /// Returns [`BrowserError::Timeout`] once `timeout` has elapsed. The
    /// selector is always tried at least once, so a zero timeout is a
    /// single lookup.
    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> BrowserResult<Self::Element> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::Timeout {
                    selector: selector.to_string(),
                });
            }
            tokio::time::sleep(poll.max(MIN_POLL)).await;
        }
    }
}
