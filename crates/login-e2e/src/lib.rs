//! login-e2e: End-to-end browser tests for the OrangeHRM login flow
//!
//! The suite is built from three pieces, all driving
//! [playwright-rs](https://crates.io/crates/playwright-rs):
//!
//! - [`BasePage`]: shared handle to one browser tab. Page objects hold one
//!   instead of inheriting from it.
//! - [`LoginPage`]: locators and actions for the login screen.
//! - [`Suite`]: launches the browser and runs each test body with a fresh,
//!   navigated page that is closed afterwards no matter how the body ends.
//!
//! # Example
//!
//! ```ignore
//! use login_e2e::{expect_page, expect_visible, Suite, SuiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> login_e2e::Result<()> {
//!     login_e2e::telemetry::init();
//!     let suite = Suite::launch(SuiteConfig::from_env()?).await?;
//!
//!     suite
//!         .run(|fx| async move {
//!             fx.login_page.login("Admin", "admin123").await?;
//!             expect_page(&fx.page).to_have_url("dashboard").await
//!         })
//!         .await?;
//!
//!     suite
//!         .run(|fx| async move {
//!             fx.login_page.login("invalid", "invalid").await?;
//!             let timeout = fx.config.assertion_timeout;
//!             expect_visible(fx.login_page.error_locator().clone(), timeout).await
//!         })
//!         .await?;
//!
//!     suite.close().await
//! }
//! ```
//!
//! Configuration comes from `LOGIN_E2E_*` environment variables, see
//! [`SuiteConfig::from_env`].

pub mod assertions;
pub mod config;
mod error;
pub mod fixture;
pub mod page;
pub mod pages;
pub mod scenarios;
pub mod telemetry;

pub use assertions::{PageExpectation, expect_hidden, expect_page, expect_visible};
pub use config::{BrowserKind, Credentials, SuiteConfig};
pub use error::{Error, Result};
pub use fixture::{Fixture, LoginFixture, Suite};
pub use page::{BasePage, PageObject};
pub use pages::LoginPage;
