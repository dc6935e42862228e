//! Driver boundary: the session/page handle page objects act through.
//!
//! The suite consumes a small abstract surface — navigation, lazy
//! selector resolution, clicks, fills, hovers, visibility and text
//! reads, bounded waits — and the `browser` feature binds it to a real
//! Chromium instance over CDP. Unit tests and demos use the scripted
//! [`crate::mock::MockPage`] instead, so the whole suite compiles and
//! tests without a browser.
//!
//! Timeout semantics, uniformly: query-style reads degrade absence to
//! `None`/`false`/`0`/empty; action-style operations on an absent
//! element fail with [`ComprarError::ElementNotFound`]. Nothing blocks
//! without a deadline.

use async_trait::async_trait;

use crate::locator::Selector;
use crate::result::ComprarResult;
use crate::wait::{poll_until, WaitOptions};

#[cfg(feature = "browser")]
use crate::result::ComprarError;

/// Abstract page/session handle.
///
/// One instance corresponds to one browser tab for the duration of a
/// scenario. Page objects borrow it; they never own or outlive it.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> ComprarResult<()>;

    /// Read the current URL
    async fn current_url(&self) -> ComprarResult<String>;

    /// Click the match at `index`.
    ///
    /// Fails with [`ComprarError::ElementNotFound`] when no such match
    /// exists — callers that want a silent skip check [`Self::count`]
    /// first.
    async fn click(&self, selector: &Selector, index: usize) -> ComprarResult<()>;

    /// Overwrite the first match's value with `text` (empty string legal)
    async fn fill(&self, selector: &Selector, text: &str) -> ComprarResult<()>;

    /// Hover the first match
    async fn hover(&self, selector: &Selector) -> ComprarResult<()>;

    /// Whether the first match is currently visible; absent is `false`
    async fn is_visible(&self, selector: &Selector) -> ComprarResult<bool>;

    /// The first match's text when visible, `None` when absent or hidden
    async fn visible_text(&self, selector: &Selector) -> ComprarResult<Option<String>>;

    /// Snapshot of every match's text content.
    ///
    /// The returned list does not re-evaluate after DOM changes.
    async fn texts(&self, selector: &Selector) -> ComprarResult<Vec<String>>;

    /// Number of current matches
    async fn count(&self, selector: &Selector) -> ComprarResult<usize>;

    /// Bounded poll until the first match is visible.
    ///
    /// Returns `false` on timeout; the caller decides whether that is an
    /// expected negative or a failed precondition.
    async fn wait_for_visible(
        &self,
        selector: &Selector,
        options: WaitOptions,
    ) -> ComprarResult<bool> {
        Ok(poll_until(options, || async move {
            self.is_visible(selector).await.unwrap_or(false)
        })
        .await)
    }
}

// ============================================================================
// CDP implementation (behind the `browser` feature)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::*;
    use crate::config::SuiteConfig;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    /// Upper bound on any single CDP evaluation round-trip
    const EVAL_DEADLINE: Duration = Duration::from_secs(30);

    /// Chromium-backed [`PageDriver`] over CDP
    #[derive(Debug)]
    pub struct CdpDriver {
        config: SuiteConfig,
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpDriver {
        /// Launch a browser and open a fresh tab.
        ///
        /// # Errors
        ///
        /// Returns an error if the browser cannot be launched or the
        /// initial page cannot be created.
        pub async fn launch(config: SuiteConfig) -> ComprarResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|e| ComprarError::BrowserLaunchError { message: e })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ComprarError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            // Drive the CDP event stream for the browser's lifetime.
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ComprarError::PageError {
                    message: e.to_string(),
                })?;

            tracing::info!(
                headless = config.headless,
                width = config.viewport_width,
                height = config.viewport_height,
                "browser launched"
            );

            Ok(Self {
                config,
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle,
            })
        }

        /// The configuration this driver was launched with
        #[must_use]
        pub const fn config(&self) -> &SuiteConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> ComprarResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ComprarError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Evaluate a JS expression with a bounded deadline
        async fn eval<T: DeserializeOwned>(&self, expr: String) -> ComprarResult<T> {
            let page = self.page.lock().await;
            let evaluated = tokio::time::timeout(EVAL_DEADLINE, page.evaluate(expr.as_str()))
                .await
                .map_err(|_| ComprarError::Timeout {
                    ms: EVAL_DEADLINE.as_millis() as u64,
                })?
                .map_err(|e| ComprarError::EvaluationError {
                    message: e.to_string(),
                })?;
            evaluated
                .into_value()
                .map_err(|e| ComprarError::EvaluationError {
                    message: e.to_string(),
                })
        }

        /// Run an action query; absent target is an `ElementNotFound`
        async fn act(&self, selector: &Selector, expr: String) -> ComprarResult<()> {
            let acted: bool = self.eval(expr).await?;
            if acted {
                Ok(())
            } else {
                Err(ComprarError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }
    }

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn goto(&self, url: &str) -> ComprarResult<()> {
            tracing::debug!(url, "goto");
            let page = self.page.lock().await;
            tokio::time::timeout(EVAL_DEADLINE, page.goto(url))
                .await
                .map_err(|_| ComprarError::Timeout {
                    ms: EVAL_DEADLINE.as_millis() as u64,
                })?
                .map_err(|e| ComprarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ComprarResult<String> {
            let page = self.page.lock().await;
            let url = page.url().await.map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| String::from("about:blank")))
        }

        async fn click(&self, selector: &Selector, index: usize) -> ComprarResult<()> {
            tracing::debug!(%selector, index, "click");
            self.act(selector, selector.to_click_query(index)).await
        }

        async fn fill(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
            tracing::debug!(%selector, "fill");
            self.act(selector, selector.to_fill_query(text)).await
        }

        async fn hover(&self, selector: &Selector) -> ComprarResult<()> {
            tracing::debug!(%selector, "hover");
            self.act(selector, selector.to_hover_query()).await
        }

        async fn is_visible(&self, selector: &Selector) -> ComprarResult<bool> {
            self.eval(selector.to_visibility_query()).await
        }

        async fn visible_text(&self, selector: &Selector) -> ComprarResult<Option<String>> {
            self.eval(selector.to_visible_text_query()).await
        }

        async fn texts(&self, selector: &Selector) -> ComprarResult<Vec<String>> {
            self.eval(selector.to_all_texts_query()).await
        }

        async fn count(&self, selector: &Selector) -> ComprarResult<usize> {
            self.eval(selector.to_count_query()).await
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;
