//! Browser implementations.
//!
//! The pipeline only sees [`crate::traits::Browser`]; the Chromium session
//! lives behind the `chromium` feature so the library builds without it.

#[cfg(feature = "chromium")]
mod chromium;

#[cfg(feature = "chromium")]
pub use chromium::{BrowserSettings, ChromiumBrowser, ChromiumElement};
