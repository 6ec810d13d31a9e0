// Tracing setup for test binaries

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "login_e2e=info";

/// Installs a `fmt` subscriber writing through the test harness's captured
/// output.
///
/// Safe to call from every test: only the first call in a process installs
/// the subscriber, later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
