// LoginPage - Page object for the OrangeHRM login screen
//
// Locators are bound once at construction and never change. Actions are
// sequential: each step is awaited before the next one starts.

use crate::error::{Error, Result};
use crate::page::{BasePage, PageObject};
use playwright_rs::Locator;

/// `input[name="username"]`
pub const USERNAME_SELECTOR: &str = r#"input[name="username"]"#;
/// `input[name="password"]`
pub const PASSWORD_SELECTOR: &str = r#"input[name="password"]"#;
/// `button[type="submit"]`
pub const SUBMIT_SELECTOR: &str = r#"button[type="submit"]"#;
/// Alert body rendered after a rejected login.
pub const ERROR_SELECTOR: &str = ".oxd-alert-content-text";

/// The login screen: two inputs, a submit button and an error alert.
///
/// # Example
///
/// ```ignore
/// use login_e2e::{expect_visible, LoginPage, Suite, SuiteConfig};
///
/// #[tokio::main]
/// async fn main() -> login_e2e::Result<()> {
///     let suite = Suite::launch(SuiteConfig::from_env()?).await?;
///     suite
///         .run(|fx| async move {
///             fx.login_page.login("invalid", "invalid").await?;
///             let timeout = fx.config.assertion_timeout;
///             expect_visible(fx.login_page.error_locator().clone(), timeout).await
///         })
///         .await?;
///     suite.close().await
/// }
/// ```
#[derive(Clone)]
pub struct LoginPage {
    base: BasePage,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_message: Locator,
}

impl LoginPage {
    pub async fn new(base: BasePage) -> Self {
        let username_input = base.locator(USERNAME_SELECTOR).await;
        let password_input = base.locator(PASSWORD_SELECTOR).await;
        let login_button = base.locator(SUBMIT_SELECTOR).await;
        let error_message = base.locator(ERROR_SELECTOR).await;

        Self {
            base,
            username_input,
            password_input,
            login_button,
            error_message,
        }
    }

    /// Fills both fields and submits the form.
    ///
    /// The page must already show the login form. Fails with
    /// [`Error::LocatorTimeout`] when a field or the button is not actionable
    /// within the action timeout; nothing is retried here.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        tracing::debug!(username, "submitting login form");

        self.base.fill(&self.username_input, username).await?;
        self.base.fill(&self.password_input, password).await?;
        self.base.click(&self.login_button).await?;

        tracing::debug!(username, url = %self.base.url(), "login form submitted");
        Ok(())
    }

    /// Text of the error alert, or `None` when it is not rendered or empty.
    ///
    /// Does not wait for the alert to appear. Callers that need it visible
    /// should assert that first (see [`crate::expect_visible`]).
    pub async fn error_message(&self) -> Result<Option<String>> {
        // text_content() auto-waits for a match, so check presence first.
        let count = self
            .error_message
            .count()
            .await
            .map_err(|e| Error::from_locator(ERROR_SELECTOR, e))?;
        if count == 0 {
            return Ok(None);
        }

        let text = self
            .error_message
            .first()
            .text_content()
            .await
            .map_err(|e| Error::from_locator(ERROR_SELECTOR, e))?;

        Ok(text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    pub fn username_input(&self) -> &Locator {
        &self.username_input
    }

    pub fn password_input(&self) -> &Locator {
        &self.password_input
    }

    pub fn login_button(&self) -> &Locator {
        &self.login_button
    }

    pub fn error_locator(&self) -> &Locator {
        &self.error_message
    }
}

impl PageObject for LoginPage {
    async fn from_base(base: BasePage) -> Self {
        LoginPage::new(base).await
    }

    fn base(&self) -> &BasePage {
        &self.base
    }

    fn page_name() -> &'static str {
        "LoginPage"
    }
}
