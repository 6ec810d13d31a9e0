// Error types for login-e2e

use thiserror::Error;

/// Result type alias for login-e2e operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to a test body.
///
/// Nothing here is recovered internally: every variant fails the single test
/// it occurred in.
#[derive(Debug, Error)]
pub enum Error {
    /// An element never became available or actionable
    ///
    /// Raised by page-object actions (fill, click) when the locator did not
    /// resolve within the action timeout.
    #[error("Locator timeout: selector '{selector}' was not actionable: {source}")]
    LocatorTimeout {
        selector: String,
        #[source]
        source: playwright_rs::Error,
    },

    /// Navigation to a URL failed
    #[error("Navigation to '{url}' failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: playwright_rs::Error,
    },

    /// A polling expectation did not hold within its timeout
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Credentials file could not be parsed
    #[error("Invalid credentials file '{path}': {source}")]
    CredentialsFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error from the browser automation layer
    #[error(transparent)]
    Playwright(#[from] playwright_rs::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Classifies a framework error raised while acting on `selector`.
    ///
    /// Timeouts and missing elements become [`Error::LocatorTimeout`];
    /// anything else (closed target, transport failure) is passed through.
    pub(crate) fn from_locator(selector: &str, source: playwright_rs::Error) -> Self {
        if is_locator_timeout(&source) {
            Error::LocatorTimeout {
                selector: selector.to_string(),
                source,
            }
        } else {
            Error::Playwright(source)
        }
    }

    /// Returns true for errors that mean "element never became usable".
    pub fn is_locator_timeout(&self) -> bool {
        match self {
            Error::LocatorTimeout { .. } => true,
            Error::Context(_, inner) => inner.is_locator_timeout(),
            _ => false,
        }
    }
}

fn is_locator_timeout(error: &playwright_rs::Error) -> bool {
    match error {
        playwright_rs::Error::Timeout(_)
        | playwright_rs::Error::ElementNotFound(_)
        | playwright_rs::Error::AssertionTimeout(_) => true,
        // Server-side action waits come back as protocol errors carrying
        // Playwright's TimeoutError text: "Timeout 30000ms exceeded."
        playwright_rs::Error::ProtocolError(message) => is_timeout_message(message),
        playwright_rs::Error::Context(_, inner) => is_locator_timeout(inner),
        _ => false,
    }
}

fn is_timeout_message(message: &str) -> bool {
    let message = message.trim_start();
    let message = message.strip_prefix("TimeoutError: ").unwrap_or(message);
    message.starts_with("Timeout ") && message.contains("exceeded")
}
