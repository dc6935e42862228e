//! Suite configuration.
//!
//! A single value struct carries everything the suite needs to target a
//! storefront deployment: the base URL, browser launch knobs, and the
//! bounded-wait intervals used by the page objects. Instances are built
//! with `with_*` methods and optionally overridden from the environment.

use serde::{Deserialize, Serialize};

/// Default storefront under test
pub const DEFAULT_BASE_URL: &str = "https://magento.softwaretestingboard.com";

/// Bounded settle interval for login-form validation rendering (ms)
pub const DEFAULT_ERROR_SETTLE_MS: u64 = 2000;

/// Bounded settle interval for registration-form validation rendering (ms)
pub const DEFAULT_REGISTER_SETTLE_MS: u64 = 1000;

/// Bounded wait for the add-to-cart confirmation toast (ms)
pub const DEFAULT_CART_CONFIRM_MS: u64 = 5000;

/// Suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the storefront under test
    pub base_url: String,
    /// Run the browser in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Default timeout for element waits (ms)
    pub default_timeout_ms: u64,
    /// Polling interval for bounded waits (ms)
    pub poll_interval_ms: u64,
    /// Settle interval for login validation errors (ms)
    pub error_settle_ms: u64,
    /// Settle interval for registration validation errors (ms)
    pub register_settle_ms: u64,
    /// Wait bound for the add-to-cart confirmation (ms)
    pub cart_confirm_ms: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            chromium_path: None,
            viewport_width: 1280,
            viewport_height: 900,
            default_timeout_ms: crate::locator::DEFAULT_TIMEOUT_MS,
            poll_interval_ms: crate::locator::DEFAULT_POLL_INTERVAL_MS,
            error_settle_ms: DEFAULT_ERROR_SETTLE_MS,
            register_settle_ms: DEFAULT_REGISTER_SETTLE_MS,
            cart_confirm_ms: DEFAULT_CART_CONFIRM_MS,
        }
    }
}

impl SuiteConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storefront base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the default element-wait timeout (ms)
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    /// Apply environment overrides.
    ///
    /// `COMPRAR_BASE_URL` replaces the base URL, `COMPRAR_HEADLESS=0`
    /// turns headless off, and `CHROMIUM_PATH` pins the browser binary.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("COMPRAR_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(headless) = std::env::var("COMPRAR_HEADLESS") {
            config.headless = parse_flag(&headless);
        }
        if let Ok(path) = std::env::var("CHROMIUM_PATH") {
            if !path.is_empty() {
                config.chromium_path = Some(path);
            }
        }
        config
    }

    /// Join the base URL and a path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Parse a boolean-ish environment flag
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
