//! Configuration Models
//!
//! Portal configuration as stored in `~/.payslip4u-downloader.json`.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// `url`, `username`, `password` and `saveDir` are required; everything else
/// has defaults matching the Payslip4U portal layout.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfig {
    /// Portal login page
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    /// Never logged or serialized back out
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Directory receiving `{date}-{type}.pdf` files; must already exist
    #[serde(default)]
    pub save_dir: String,
    #[serde(default)]
    pub selectors: PortalSelectors,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub browser: BrowserOptions,
}

impl PortalConfig {
    /// Build a config with default selectors, timing and browser options.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        save_dir: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            save_dir: save_dir.into(),
            selectors: PortalSelectors::default(),
            timing: TimingConfig::default(),
            browser: BrowserOptions::default(),
        }
    }

    /// Check required fields. The first missing one is reported.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("url", &self.url),
            ("username", &self.username),
            ("password", &self.password),
            ("saveDir", &self.save_dir),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("'{}' is required in the config", name));
            }
        }

        self.selectors.validate()?;
        if self.browser.request_timeout_ms == 0 {
            return Err("'browser.requestTimeoutMs' must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn save_dir(&self) -> &Path {
        Path::new(&self.save_dir)
    }
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("save_dir", &self.save_dir)
            .field("selectors", &self.selectors)
            .field("timing", &self.timing)
            .field("browser", &self.browser)
            .finish()
    }
}

/// CSS selectors for the portal's login form and document list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalSelectors {
    pub username: String,
    pub password: String,
    pub submit: String,
    /// Control that expands the collapsed document list
    pub show_all: String,
    /// One element per document row
    pub row: String,
    /// Positional child cells within a row
    pub cell: String,
    /// Anchor inside the link cell
    pub link: String,
}

impl Default for PortalSelectors {
    fn default() -> Self {
        Self {
            username: "#Username".to_string(),
            password: "#Password".to_string(),
            submit: r#"button[type="submit"]"#.to_string(),
            show_all: r#"[ng-click="showAllPayslips()"]"#.to_string(),
            row: ".row .hide-for-small".to_string(),
            cell: "div".to_string(),
            link: "a".to_string(),
        }
    }
}

impl PortalSelectors {
    fn validate(&self) -> Result<(), String> {
        let all = [
            ("selectors.username", &self.username),
            ("selectors.password", &self.password),
            ("selectors.submit", &self.submit),
            ("selectors.showAll", &self.show_all),
            ("selectors.row", &self.row),
            ("selectors.cell", &self.cell),
            ("selectors.link", &self.link),
        ];
        for (name, value) in all {
            if value.trim().is_empty() {
                return Err(format!("'{}' must not be empty", name));
            }
        }
        Ok(())
    }
}

/// Fixed settle delays. The portal offers no completion signal to poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    /// Wait after login navigation before touching the UI
    pub login_settle_ms: u64,
    /// Wait after revealing the full list before scanning rows
    pub list_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            login_settle_ms: 1500,
            list_settle_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn login_settle(&self) -> Duration {
        Duration::from_millis(self.login_settle_ms)
    }

    pub fn list_settle(&self) -> Duration {
        Duration::from_millis(self.list_settle_ms)
    }

    /// No settle delays at all, for fakes that render synchronously.
    pub fn immediate() -> Self {
        Self {
            login_settle_ms: 0,
            list_settle_ms: 0,
        }
    }
}

/// Chrome launch options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; autodetected when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Upper bound on one devtools call. A whole in-page download is a
    /// single call, so this must exceed the slowest expected document.
    pub request_timeout_ms: u64,
}

/// Ten minutes
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 600_000;

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl BrowserOptions {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
