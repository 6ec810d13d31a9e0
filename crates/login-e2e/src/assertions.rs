// Assertions - Auto-retry expectations on pages and locators
//
// Locator assertions delegate to playwright's own `expect()`. playwright-rs
// has no page-level URL assertion, so `PageExpectation` polls `Page::url()`
// with the same timeout/poll/negate shape as the locator `Expectation`.
//
// See: https://playwright.dev/docs/test-assertions#page-assertions-to-have-url

use crate::config::DEFAULT_ASSERTION_TIMEOUT;
use crate::error::{Error, Result};
use playwright_rs::{Locator, Page};
use regex::Regex;
use std::time::Duration;

/// Default polling interval for page assertions (100ms, as for locators)
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates an expectation on the page's URL.
///
/// # Example
///
/// ```ignore
/// use login_e2e::expect_page;
///
/// # async fn check(page: &playwright_rs::Page) -> login_e2e::Result<()> {
/// expect_page(page).to_have_url("dashboard").await?;
/// expect_page(page).not().to_have_url("auth/login").await?;
/// # Ok(())
/// # }
/// ```
pub fn expect_page(page: &Page) -> PageExpectation {
    PageExpectation::new(page.clone())
}

/// Expectation on a page, retried until it holds or times out.
pub struct PageExpectation {
    page: Page,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl PageExpectation {
    fn new(page: Page) -> Self {
        Self {
            page,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Asserts that the page URL matches `pattern` (a regular expression,
    /// unanchored, so `"dashboard"` matches any URL containing it).
    pub async fn to_have_url(self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("invalid URL pattern '{}': {}", pattern, e)))?;
        self.to_have_url_regex(&regex).await
    }

    pub async fn to_have_url_regex(self, pattern: &Regex) -> Result<()> {
        let start = std::time::Instant::now();

        loop {
            let url = self.page.url();
            let is_match = pattern.is_match(&url);
            let matches = if self.negate { !is_match } else { is_match };

            if matches {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = if self.negate {
                    format!(
                        "Expected page URL NOT to match /{}/, but got '{}' after {:?}",
                        pattern, url, self.timeout
                    )
                } else {
                    format!(
                        "Expected page URL to match /{}/, but got '{}' after {:?}",
                        pattern, url, self.timeout
                    )
                };
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Asserts that `locator` becomes visible within `timeout`.
pub async fn expect_visible(locator: Locator, timeout: Duration) -> Result<()> {
    playwright_rs::expect(locator)
        .with_timeout(timeout)
        .to_be_visible()
        .await
        .map_err(from_assertion)
}

/// Asserts that `locator` is hidden (or absent) within `timeout`.
pub async fn expect_hidden(locator: Locator, timeout: Duration) -> Result<()> {
    playwright_rs::expect(locator)
        .with_timeout(timeout)
        .to_be_hidden()
        .await
        .map_err(from_assertion)
}

fn from_assertion(error: playwright_rs::Error) -> Error {
    match error {
        playwright_rs::Error::AssertionTimeout(message) => Error::AssertionTimeout(message),
        other => Error::Playwright(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_timeouts_keep_their_message() {
        let err = from_assertion(playwright_rs::Error::AssertionTimeout(
            "Expected element '.oxd-alert-content-text' to be visible".to_string(),
        ));
        match err {
            Error::AssertionTimeout(message) => assert!(message.contains(".oxd-alert")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_are_framework_errors() {
        let err = from_assertion(playwright_rs::Error::ChannelClosed);
        assert!(matches!(err, Error::Playwright(_)));
    }

    #[test]
    fn test_dashboard_pattern_is_unanchored() {
        let pattern = Regex::new("dashboard").unwrap();
        assert!(pattern.is_match(
            "https://opensource-demo.orangehrmlive.com/web/index.php/dashboard/index"
        ));
        assert!(!pattern.is_match(
            "https://opensource-demo.orangehrmlive.com/web/index.php/auth/login"
        ));
    }
}
