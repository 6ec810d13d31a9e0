// Integration tests for the fixture lifecycle
//
// Tests cover:
// - Page is closed exactly once when the body succeeds, fails or panics
// - Page is closed when navigation fails before the body runs
// - Each run gets its own page and context (no shared state)
// - The page object is bound to a page already at the application root


use futures_util::FutureExt;
use login_e2e::{Error, Fixture, LoginFixture, LoginPage, PageObject, Suite, SuiteConfig};
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use test_server::TestServer;

// ============================================================================
// Cleanup
// ============================================================================

#[tokio::test]
async fn test_page_closed_on_every_exit_path() {
    login_e2e::telemetry::init();
    let server = TestServer::start().await;
    let suite = Suite::launch(server.config())
        .await
        .expect("Failed to launch suite");

    // Body succeeds
    let kept = suite
        .run(|fx| async move { Ok(fx.page.clone()) })
        .await
        .expect("Successful body should return its value");
    assert_eq!(suite.pages_opened(), 1);
    assert_eq!(suite.pages_closed(), 1);

    assert!(kept.url().starts_with(&server.url()));

    // Body fails
    let err = suite
        .run(|_fx| async move {
            Err::<(), _>(Error::AssertionTimeout("forced failure".to_string()))
        })
        .await
        .expect_err("Failing body should propagate its error");
    assert!(matches!(err, Error::AssertionTimeout(_)));
    assert_eq!(suite.pages_opened(), 2);
    assert_eq!(suite.pages_closed(), 2);

    // Body panics: cleanup runs, then the panic continues
    let outcome = AssertUnwindSafe(suite.run(panicking_body))
        .catch_unwind()
        .await;
    assert!(outcome.is_err(), "Panic must be resumed after cleanup");
    assert_eq!(suite.pages_opened(), 3);
    assert_eq!(suite.pages_closed(), 3);

    suite.close().await.expect("Failed to close suite");
    server.shutdown();
}

#[allow(unreachable_code)]
async fn panicking_body(_fx: LoginFixture) -> login_e2e::Result<()> {
    panic!("forced panic inside test body");
    Ok(())
}

#[tokio::test]
async fn test_page_closed_when_navigation_fails() {
    // Reserve a port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);

    let config = SuiteConfig::default()
        .with_base_url(&format!("http://{}", addr))
        .expect("Valid base URL")
        .with_action_timeout(Duration::from_secs(2));
    let suite = Suite::launch(config).await.expect("Failed to launch suite");

    let err = suite
        .run(|_fx| async move { Ok(()) })
        .await
        .expect_err("Navigation to a closed port must fail");

    match err {
        Error::Navigation { url, .. } => assert_eq!(url, format!("http://{}/", addr)),
        other => panic!("expected Navigation, got {:?}", other),
    }
    assert_eq!(suite.pages_opened(), 1);
    assert_eq!(suite.pages_closed(), 1);

    suite.close().await.expect("Failed to close suite");
}

// ============================================================================
// Isolation
// ============================================================================

#[tokio::test]
async fn test_concurrent_runs_are_isolated() {
    let server = TestServer::start().await;
    let suite = Suite::launch(server.config())
        .await
        .expect("Failed to launch suite");

    let (first, second) = tokio::join!(
        suite.run(|fx| async move {
            fx.login_page.username_input().fill("first-user", None).await?;
            Ok(fx.login_page.username_input().input_value(None).await?)
        }),
        suite.run(|fx| async move {
            fx.login_page.username_input().fill("second-user", None).await?;
            Ok(fx.login_page.username_input().input_value(None).await?)
        }),
    );

    assert_eq!(first.expect("First run failed"), "first-user");
    assert_eq!(second.expect("Second run failed"), "second-user");
    assert_eq!(suite.pages_closed(), 2);

    // A later run starts from a blank form
    let value = suite
        .run(|fx| async move { Ok(fx.login_page.username_input().input_value(None).await?) })
        .await
        .expect("Third run failed");
    assert_eq!(value, "");

    suite.close().await.expect("Failed to close suite");
    server.shutdown();
}

#[tokio::test]
async fn test_run_with_generic_page_object() {
    let server = TestServer::start().await;
    let suite = Suite::launch(server.config())
        .await
        .expect("Failed to launch suite");

    let root = format!("{}/", server.url());
    suite
        .run_with(|fx: Fixture<LoginPage>| async move {
            assert_eq!(fx.page.url(), root);
            assert_eq!(fx.page_object.base().url(), root);
            assert_eq!(LoginPage::entry_path(), "/");
            assert_eq!(fx.page_object.login_button().count().await?, 1);
            Ok(())
        })
        .await
        .expect("run_with should open the page object's entry path");

    suite.close().await.expect("Failed to close suite");
    server.shutdown();
}
