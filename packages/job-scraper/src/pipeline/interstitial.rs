//! Bot-verification challenge detection.
//!
//! Detection fails open: a scan error is logged and treated as "no
//! challenge", since a later check will catch a challenge that is really
//! there.

use tracing::{info, warn};

use super::pace;
use crate::error::BrowserResult;
use crate::traits::{Browser, Element, Operator};
use crate::types::ScrapeConfig;

/// Instruction shown to the operator when a challenge blocks the page.
pub const SOLVE_CHALLENGE_INSTRUCTION: &str = "Solve the CAPTCHA, then press ENTER to continue";

/// Where a challenge was spotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// An embedded frame served by a challenge platform
    Frame,
    /// A marked widget element on the page itself
    Widget,
}

/// Scan the current page for a challenge.
pub async fn detect_challenge<B: Browser>(
    browser: &B,
    config: &ScrapeConfig,
) -> BrowserResult<Option<ChallengeKind>> {
    for frame in browser.find_elements(&config.selectors.frame).await? {
        if let Some(src) = frame.attribute("src").await? {
            if src.contains(&config.challenge.frame_src) {
                return Ok(Some(ChallengeKind::Frame));
            }
        }
    }

    let widgets = browser
        .find_elements(&config.challenge.widget_selector)
        .await?;
    if !widgets.is_empty() {
        return Ok(Some(ChallengeKind::Widget));
    }

    Ok(None)
}

/// Check for a challenge and, if one is present, block on the operator.
///
/// Returns true when a challenge was detected and resolution awaited.
pub async fn check_and_wait<B: Browser, O: Operator>(
    browser: &B,
    operator: &O,
    config: &ScrapeConfig,
) -> bool {
    let kind = match detect_challenge(browser, config).await {
        Ok(Some(kind)) => kind,
        Ok(None) => return false,
        Err(e) => {
            warn!(error = %e, "Error while checking for CAPTCHA");
            return false;
        }
    };

    info!(?kind, "CAPTCHA detected");
    if let Err(e) = operator
        .await_confirmation(SOLVE_CHALLENGE_INSTRUCTION)
        .await
    {
        warn!(error = %e, "Operator prompt failed; continuing");
    }
    pace(config.challenge_settle).await;
    true
}
