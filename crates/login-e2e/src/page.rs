// BasePage - Shared page handle for page objects
//
// Page objects hold a BasePage rather than extending one. The handle carries
// the playwright Page, the application root every relative path resolves
// against, and the action timeout forwarded to fill/click.

use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use playwright_rs::{ClickOptions, FillOptions, GotoOptions, Locator, Page};
use std::time::Duration;
use url::Url;

/// Handle to one browser tab, shared by the page objects built on it.
///
/// Cloning is cheap and every clone drives the same tab.
#[derive(Clone)]
pub struct BasePage {
    page: Page,
    base_url: Url,
    action_timeout: Duration,
}

impl BasePage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
            action_timeout: config.action_timeout,
        }
    }

    /// The underlying playwright page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Current URL of the tab.
    pub fn url(&self) -> String {
        self.page.url()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the application root, the way a browser
    /// resolves a relative link.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("cannot resolve '{}': {}", path, e)))
    }

    /// Navigates the tab to `path`, relative to the application root.
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let url = self.resolve(path)?;
        tracing::debug!(url = %url, "navigating");

        let options = GotoOptions::new().timeout(self.action_timeout);
        self.page
            .goto(url.as_str(), Some(options))
            .await
            .map_err(|source| Error::Navigation {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    fn action_timeout_ms(&self) -> f64 {
        self.action_timeout.as_millis() as f64
    }

    /// Creates a lazy locator; nothing is queried until it is acted on.
    pub async fn locator(&self, selector: &str) -> Locator {
        self.page.locator(selector).await
    }

    /// Fills `locator` with `text`, waiting up to the action timeout.
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        let options = FillOptions::builder()
            .timeout(self.action_timeout_ms())
            .build();
        locator
            .fill(text, Some(options))
            .await
            .map_err(|e| Error::from_locator(locator.selector(), e))
    }

    /// Clicks `locator`, waiting up to the action timeout.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let options = ClickOptions::builder()
            .timeout(self.action_timeout_ms())
            .build();
        locator
            .click(Some(options))
            .await
            .map_err(|e| Error::from_locator(locator.selector(), e))
    }
}

/// A page object built on a [`BasePage`].
///
/// Lets the fixture construct any page object once the tab is ready.
#[allow(async_fn_in_trait)]
pub trait PageObject: Sized {
    /// Binds the page object's locators to `base`.
    async fn from_base(base: BasePage) -> Self;

    fn base(&self) -> &BasePage;

    /// Path the fixture opens before handing the page object to a test.
    fn entry_path() -> &'static str {
        "/"
    }

    /// Name used in log events.
    fn page_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
