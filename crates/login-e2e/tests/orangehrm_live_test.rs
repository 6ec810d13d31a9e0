// Login scenarios against the public OrangeHRM demo
//
// These need network access and a live third-party site, so they are ignored
// by default. Run with:
//
//   cargo test -p login-e2e --test orangehrm_live_test -- --ignored
//
// LOGIN_E2E_BASE_URL and the credential variables redirect them to another
// instance.

use login_e2e::scenarios::{invalid_login_shows_error, valid_login_reaches_dashboard};
use login_e2e::{Suite, SuiteConfig};
use std::time::Duration;

// The demo is slow to answer; give it more than the 5s default unless the
// environment says otherwise.
fn live_config() -> SuiteConfig {
    let config = SuiteConfig::from_env().expect("Invalid LOGIN_E2E_* configuration");
    if std::env::var("LOGIN_E2E_ASSERTION_TIMEOUT_MS").is_ok() {
        config
    } else {
        config.with_assertion_timeout(Duration::from_secs(20))
    }
}

#[tokio::test]
#[ignore = "requires network access to the OrangeHRM demo"]
async fn test_live_valid_login() {
    login_e2e::telemetry::init();
    let suite = Suite::launch(live_config())
        .await
        .expect("Failed to launch suite");

    suite
        .run(|fx| async move {
            let credentials = fx.config.valid_credentials.clone();
            valid_login_reaches_dashboard(&fx, &credentials).await
        })
        .await
        .expect("should login with valid credentials");

    suite.close().await.expect("Failed to close suite");
}

#[tokio::test]
#[ignore = "requires network access to the OrangeHRM demo"]
async fn test_live_invalid_login() {
    login_e2e::telemetry::init();
    let suite = Suite::launch(live_config())
        .await
        .expect("Failed to launch suite");

    suite
        .run(|fx| async move {
            let credentials = fx.config.invalid_credentials.clone();
            invalid_login_shows_error(&fx, &credentials).await?;

            let message = fx.login_page.error_message().await?;
            assert_eq!(message.as_deref(), Some("Invalid credentials"));
            Ok(())
        })
        .await
        .expect("should show error with invalid credentials");

    suite.close().await.expect("Failed to close suite");
}
