//! Bounded wait mechanisms.
//!
//! Every synchronization point in the suite is a bounded poll: a
//! predicate evaluated on an interval until it holds or the deadline
//! passes. A timeout is a normal negative result, never a panic — the
//! caller decides whether `false` is an expected outcome (cart
//! confirmation absent) or a failed precondition.
//!
//! This replaces the fixed-duration sleeps the storefront flows
//! historically used for client-side validation: the poll stops as soon
//! as the condition stabilizes instead of always paying the full
//! interval.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a wait operation, for diagnostics
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Whether the condition was met before the deadline
    pub success: bool,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a successful wait result
    #[must_use]
    pub fn success(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: true,
            elapsed,
            waited_for: waited_for.into(),
        }
    }

    /// Create a timeout wait result
    #[must_use]
    pub fn timeout(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            waited_for: waited_for.into(),
        }
    }
}

/// Poll `predicate` until it returns true or the deadline passes.
///
/// The predicate is evaluated immediately, then once per poll interval.
/// Returns whether the condition was met; a timeout is `false`, never an
/// error.
pub async fn poll_until<F, Fut>(options: WaitOptions, mut predicate: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + options.timeout();
    loop {
        if predicate().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Poll `predicate` and report elapsed time alongside the outcome.
pub async fn poll_with_result<F, Fut>(
    options: WaitOptions,
    waited_for: impl Into<String>,
    predicate: F,
) -> WaitResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let started = Instant::now();
    let met = poll_until(options, predicate).await;
    let elapsed = started.elapsed();
    if met {
        WaitResult::success(elapsed, waited_for)
    } else {
        WaitResult::timeout(elapsed, waited_for)
    }
}
