// Login scenarios shared by the local and live test suites

use crate::assertions::{expect_page, expect_visible};
use crate::config::Credentials;
use crate::error::Result;
use crate::fixture::LoginFixture;

/// URL pattern the application redirects to after a successful login.
pub const DASHBOARD_URL_PATTERN: &str = "dashboard";

/// Valid credentials land on the dashboard.
pub async fn valid_login_reaches_dashboard(
    fx: &LoginFixture,
    credentials: &Credentials,
) -> Result<()> {
    fx.login_page
        .login(&credentials.username, &credentials.password)
        .await?;

    expect_page(&fx.page)
        .with_timeout(fx.config.assertion_timeout)
        .to_have_url(DASHBOARD_URL_PATTERN)
        .await
}

/// Rejected credentials show the error alert.
pub async fn invalid_login_shows_error(
    fx: &LoginFixture,
    credentials: &Credentials,
) -> Result<()> {
    fx.login_page
        .login(&credentials.username, &credentials.password)
        .await?;

    expect_visible(
        fx.login_page.error_locator().clone(),
        fx.config.assertion_timeout,
    )
    .await
}
