// Fixture - Per-test browser page with guaranteed cleanup
//
// A Suite owns the Playwright connection and one launched browser. Every
// `run` gets its own browser context and page, navigates it to the
// application root, builds the page object and hands both to the test body.
// The page is closed after the body returns, fails or panics.
//
// Lifecycle per run:
//   new_context -> new_page -> navigate(entry path) -> PageObject::from_base
//   -> body -> page.close -> context.close -> (resume panic | return result)

use crate::config::{BrowserKind, SuiteConfig};
use crate::error::{Error, Result};
use crate::page::{BasePage, PageObject};
use crate::pages::LoginPage;
use futures_util::FutureExt;
use playwright_rs::{Browser, BrowserContext, LaunchOptions, Page, Playwright};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a login test body receives.
pub struct LoginFixture {
    /// The tab the login page lives on, for URL assertions.
    pub page: Page,
    pub login_page: LoginPage,
    pub config: SuiteConfig,
}

/// Generic form of [`LoginFixture`] for other page objects.
pub struct Fixture<P> {
    pub page: Page,
    pub page_object: P,
    pub config: SuiteConfig,
}

/// Browser runtime shared by the tests of one binary or one test function.
///
/// # Example
///
/// ```ignore
/// use login_e2e::{expect_page, Suite, SuiteConfig};
///
/// #[tokio::test]
/// async fn valid_login() -> login_e2e::Result<()> {
///     let suite = Suite::launch(SuiteConfig::from_env()?).await?;
///     suite
///         .run(|fx| async move {
///             fx.login_page.login("Admin", "admin123").await?;
///             expect_page(&fx.page).to_have_url("dashboard").await
///         })
///         .await?;
///     suite.close().await
/// }
/// ```
pub struct Suite {
    config: SuiteConfig,
    playwright: Playwright,
    browser: Browser,
    pages_opened: AtomicUsize,
    pages_closed: AtomicUsize,
}

impl Suite {
    /// Starts the Playwright server and launches the configured browser.
    pub async fn launch(config: SuiteConfig) -> Result<Self> {
        let playwright = Playwright::launch()
            .await
            .map_err(|e| Error::Playwright(e).context("launching Playwright"))?;

        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let mut options = LaunchOptions::new().headless(config.headless);
        if let Some(slow_mo) = config.slow_mo {
            options = options.slow_mo(slow_mo.as_millis() as f64);
        }

        let browser = browser_type
            .launch_with_options(options)
            .await
            .map_err(|e| Error::Playwright(e).context(format!("launching {}", config.browser)))?;

        tracing::info!(
            browser = %config.browser,
            version = browser.version(),
            headless = config.headless,
            base_url = %config.base_url,
            "browser launched"
        );

        Ok(Self {
            config,
            playwright,
            browser,
            pages_opened: AtomicUsize::new(0),
            pages_closed: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs `body` against a freshly opened login page.
    pub async fn run<F, Fut, T>(&self, body: F) -> Result<T>
    where
        F: FnOnce(LoginFixture) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let config = self.config.clone();
        self.scoped::<LoginPage, _, _, _>(|page, login_page| {
            body(LoginFixture {
                page,
                login_page,
                config,
            })
        })
        .await
    }

    /// Runs `body` against a freshly opened page object of type `P`.
    pub async fn run_with<P, F, Fut, T>(&self, body: F) -> Result<T>
    where
        P: PageObject,
        F: FnOnce(Fixture<P>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let config = self.config.clone();
        self.scoped::<P, _, _, _>(|page, page_object| {
            body(Fixture {
                page,
                page_object,
                config,
            })
        })
        .await
    }

    /// Number of pages opened by `run`/`run_with` so far.
    pub fn pages_opened(&self) -> usize {
        self.pages_opened.load(Ordering::SeqCst)
    }

    /// Number of pages closed after their test body finished.
    pub fn pages_closed(&self) -> usize {
        self.pages_closed.load(Ordering::SeqCst)
    }

    /// Closes the browser and shuts the Playwright server down.
    ///
    /// The server is shut down even when closing the browser fails; the
    /// first error is returned.
    pub async fn close(self) -> Result<()> {
        let closed = self.browser.close().await;
        if let Err(e) = &closed {
            tracing::warn!(error = %e, "failed to close browser");
        }
        let shutdown = self.playwright.shutdown().await;
        if let Err(e) = &shutdown {
            tracing::warn!(error = %e, "failed to shut down Playwright server");
        }
        tracing::info!(
            opened = self.pages_opened(),
            closed = self.pages_closed(),
            "suite closed"
        );
        first_error(closed, shutdown)
    }

    async fn scoped<P, F, Fut, T>(&self, body: F) -> Result<T>
    where
        P: PageObject,
        F: FnOnce(Page, P) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let context = self.browser.new_context().await?;
        let page = match context.new_page().await {
            Ok(page) => page,
            Err(e) => {
                close_context(&context).await;
                return Err(e.into());
            }
        };
        self.pages_opened.fetch_add(1, Ordering::SeqCst);
        tracing::info!(page_object = P::page_name(), "fixture page opened");

        let base = BasePage::new(page.clone(), &self.config);
        let outcome = AssertUnwindSafe(async {
            base.navigate(P::entry_path()).await?;
            let page_object = P::from_base(base).await;
            body(page.clone(), page_object).await
        })
        .catch_unwind()
        .await;

        let closed = self.close_page(&page).await;
        close_context(&context).await;

        match outcome {
            Ok(Ok(value)) => closed.map(|_| value),
            Ok(Err(e)) => {
                tracing::info!(page_object = P::page_name(), error = %e, "test body failed");
                Err(e)
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn close_page(&self, page: &Page) -> Result<()> {
        match page.close().await {
            Ok(()) => {
                self.pages_closed.fetch_add(1, Ordering::SeqCst);
                tracing::info!("fixture page closed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to close fixture page");
                Err(Error::Playwright(e).context("closing fixture page"))
            }
        }
    }
}

fn first_error(
    closed: playwright_rs::Result<()>,
    shutdown: playwright_rs::Result<()>,
) -> Result<()> {
    closed.map_err(|e| Error::Playwright(e).context("closing browser"))?;
    shutdown.map_err(|e| Error::Playwright(e).context("shutting down Playwright"))?;
    Ok(())
}

async fn close_context(context: &BrowserContext) {
    if let Err(e) = context.close().await {
        tracing::warn!(error = %e, "failed to close browser context");
    }
}
