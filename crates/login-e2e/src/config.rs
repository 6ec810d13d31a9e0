// Suite configuration
//
// Every knob is read from a `LOGIN_E2E_*` environment variable and falls back
// to the values the suite was written against (the public OrangeHRM demo and
// its published admin account).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Public OrangeHRM demo instance.
pub const DEFAULT_BASE_URL: &str = "https://opensource-demo.orangehrmlive.com/";

/// Default action timeout, matching Playwright's own default.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default assertion timeout, matching Playwright's `expect` default.
pub const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

const ENV_PREFIX: &str = "LOGIN_E2E_";

/// Browser engine to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "unknown browser '{}', expected chromium, firefox or webkit",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A username/password pair submitted through the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The demo instance's administrator account.
    pub fn demo_admin() -> Self {
        Self::new("Admin", "admin123")
    }

    /// A pair the application is expected to reject.
    pub fn rejected() -> Self {
        Self::new("invalid", "invalid")
    }
}

/// Shape of the optional `LOGIN_E2E_CREDENTIALS_FILE` JSON document.
#[derive(Debug, Clone, Deserialize)]
struct CredentialsFile {
    valid: Option<Credentials>,
    invalid: Option<Credentials>,
}

/// Settings shared by every test in a run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: Url,
    pub browser: BrowserKind,
    pub headless: bool,
    pub slow_mo: Option<Duration>,
    pub action_timeout: Duration,
    pub assertion_timeout: Duration,
    pub valid_credentials: Credentials,
    pub invalid_credentials: Credentials,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            browser: BrowserKind::default(),
            headless: true,
            slow_mo: None,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
            assertion_timeout: DEFAULT_ASSERTION_TIMEOUT,
            valid_credentials: Credentials::demo_admin(),
            invalid_credentials: Credentials::rejected(),
        }
    }
}

impl SuiteConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which receives full variable
    /// names such as `LOGIN_E2E_BASE_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };

        let mut config = SuiteConfig::default();

        if let Some(raw) = var("BASE_URL") {
            config.base_url = parse_base_url(&raw)?;
        }
        if let Some(raw) = var("BROWSER") {
            config.browser = raw.parse()?;
        }
        if let Some(raw) = var("HEADLESS") {
            config.headless = parse_bool("HEADLESS", &raw)?;
        }
        if let Some(raw) = var("SLOW_MO_MS") {
            config.slow_mo = Some(parse_millis("SLOW_MO_MS", &raw)?);
        }
        if let Some(raw) = var("ACTION_TIMEOUT_MS") {
            config.action_timeout = parse_millis("ACTION_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = var("ASSERTION_TIMEOUT_MS") {
            config.assertion_timeout = parse_millis("ASSERTION_TIMEOUT_MS", &raw)?;
        }

        // File first, then individual variables override it.
        if let Some(path) = var("CREDENTIALS_FILE") {
            let file = load_credentials_file(Path::new(&path))?;
            if let Some(valid) = file.valid {
                config.valid_credentials = valid;
            }
            if let Some(invalid) = file.invalid {
                config.invalid_credentials = invalid;
            }
        }
        if let Some(username) = var("USERNAME") {
            config.valid_credentials.username = username;
        }
        if let Some(password) = var("PASSWORD") {
            config.valid_credentials.password = password;
        }
        if let Some(username) = var("INVALID_USERNAME") {
            config.invalid_credentials.username = username;
        }
        if let Some(password) = var("INVALID_PASSWORD") {
            config.invalid_credentials.password = password;
        }

        Ok(config)
    }

    /// Points the suite at a different application root.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    pub fn with_assertion_timeout(mut self, timeout: Duration) -> Self {
        self.assertion_timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("BASE_URL '{}' is not a valid URL: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "BASE_URL '{}' cannot be used as a base for relative paths",
            raw
        )));
    }
    Ok(url)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{}{} expects a boolean, got '{}'",
            ENV_PREFIX, name, other
        ))),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            Error::Config(format!(
                "{}{} expects milliseconds, got '{}'",
                ENV_PREFIX, name, raw
            ))
        })
}

fn load_credentials_file(path: &Path) -> Result<CredentialsFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(e).context(format!("reading {}", path.display())))?;
    serde_json::from_str(&content).map_err(|source| Error::CredentialsFile {
        path: path.display().to_string(),
        source,
    })
}
