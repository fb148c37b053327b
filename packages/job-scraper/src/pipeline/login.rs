//! Manual login checkpoint before scraping.

use tracing::info;

use super::Scraper;
use crate::error::Result;
use crate::traits::{Browser, Operator, AI};

/// Sign-in page opened for the operator.
pub const DEFAULT_LOGIN_URL: &str = "https://www.indeed.com/account/login";

/// Instruction shown while the operator signs in.
pub const LOGIN_INSTRUCTION: &str = "Log in manually in the browser, then press ENTER to continue";

impl<B: Browser, A: AI, O: Operator> Scraper<B, A, O> {
    /// Open the login page and block until the operator has signed in.
    ///
    /// Unlike challenge prompts, a failure here aborts the run.
    pub async fn login(&self, login_url: &str) -> Result<()> {
        info!(url = %login_url, "Opening login page");
        self.browser.navigate(login_url).await?;
        self.operator.await_confirmation(LOGIN_INSTRUCTION).await?;
        info!("Login confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::testing::{MockAI, MockBrowser, ScriptedOperator};
    use crate::types::ScrapeConfig;

    #[tokio::test]
    async fn test_login_navigates_then_prompts() {
        let scraper = Scraper::new(
            MockBrowser::new(),
            MockAI::new(),
            ScriptedOperator::new(),
            ScrapeConfig::default().without_delays(),
        );

        scraper.login(DEFAULT_LOGIN_URL).await.unwrap();

        assert_eq!(scraper.browser().navigations(), vec![DEFAULT_LOGIN_URL]);
        assert_eq!(scraper.operator().instructions(), vec![LOGIN_INSTRUCTION]);
    }

    #[tokio::test]
    async fn test_operator_failure_aborts() {
        let scraper = Scraper::new(
            MockBrowser::new(),
            MockAI::new(),
            ScriptedOperator::new().failing("stdin closed"),
            ScrapeConfig::default().without_delays(),
        );

        let err = scraper.login(DEFAULT_LOGIN_URL).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Operator(_)));
    }

    #[tokio::test]
    async fn test_navigation_failure_aborts() {
        let browser = MockBrowser::new().with_navigation_failure(DEFAULT_LOGIN_URL, "offline");
        let scraper = Scraper::new(
            browser,
            MockAI::new(),
            ScriptedOperator::new(),
            ScrapeConfig::default().without_delays(),
        );

        let err = scraper.login(DEFAULT_LOGIN_URL).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Browser(_)));
        assert!(scraper.operator().instructions().is_empty());
    }
}
