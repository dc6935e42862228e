//! Scripted in-memory driver for browser-free tests.
//!
//! `MockPage` implements [`PageDriver`] over a scripted DOM: tests
//! declare which elements exist, whether they are visible, and what text
//! they carry, then drive page objects exactly as a real scenario would.
//! Every action is recorded in order, and click hooks let a test model
//! store-side behavior — navigation on submit, a success toast after a
//! valid add-to-cart, cart-counter arithmetic.
//!
//! `wait_for_visible` here is a single immediate check rather than a
//! poll, so negative-path tests (confirmation never appears) finish
//! instantly while preserving the timeout-is-false contract.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::driver::PageDriver;
use crate::locator::Selector;
use crate::result::{ComprarError, ComprarResult};
use crate::wait::WaitOptions;

/// Scripted state of one element set (all matches of one selector)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Text content of each match; the match count is `texts.len()`
    pub texts: Vec<String>,
    /// Whether the first match is visible
    pub visible: bool,
}

impl MockElement {
    /// A visible element set with the given per-match texts
    #[must_use]
    pub fn visible(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| (*t).to_string()).collect(),
            visible: true,
        }
    }

    /// A present but hidden element set
    #[must_use]
    pub fn hidden(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| (*t).to_string()).collect(),
            visible: false,
        }
    }
}

/// One recorded driver action, in issue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// Navigation
    Goto {
        /// Target URL
        url: String,
    },
    /// Click on the match at `index`
    Click {
        /// Selector used
        selector: Selector,
        /// Match index
        index: usize,
    },
    /// Value overwrite
    Fill {
        /// Selector used
        selector: Selector,
        /// Text written
        text: String,
    },
    /// Hover
    Hover {
        /// Selector used
        selector: Selector,
    },
}

/// The scripted DOM a [`MockPage`] resolves against.
///
/// Click hooks receive `&mut MockDom` and may mutate anything here.
#[derive(Debug, Default)]
pub struct MockDom {
    /// Current URL
    pub url: String,
    elements: HashMap<Selector, MockElement>,
    fills: HashMap<Selector, String>,
    log: Vec<Recorded>,
}

impl MockDom {
    /// Insert or replace an element set
    pub fn upsert(&mut self, selector: Selector, element: MockElement) {
        let _ = self.elements.insert(selector, element);
    }

    /// Remove an element set
    pub fn remove(&mut self, selector: &Selector) {
        let _ = self.elements.remove(selector);
    }

    /// Last value filled into `selector`, if any
    #[must_use]
    pub fn fill_of(&self, selector: &Selector) -> Option<&str> {
        self.fills.get(selector).map(String::as_str)
    }

    /// Current scripted state of `selector`, if any
    #[must_use]
    pub fn element(&self, selector: &Selector) -> Option<&MockElement> {
        self.elements.get(selector)
    }

    /// Whether `selector` was clicked at any point
    #[must_use]
    pub fn was_clicked(&self, selector: &Selector) -> bool {
        self.log
            .iter()
            .any(|r| matches!(r, Recorded::Click { selector: s, .. } if s == selector))
    }

    /// Resolve a selector against the scripted elements.
    ///
    /// A `CssWithText` refinement falls back to filtering the base CSS
    /// entry's texts by exact trimmed match, mirroring how the real
    /// driver filters a resolved list.
    fn resolve(&self, selector: &Selector) -> Option<MockElement> {
        if let Some(element) = self.elements.get(selector) {
            return Some(element.clone());
        }
        if let Selector::CssWithText { css, text } = selector {
            let base = self.elements.get(&Selector::Css(css.clone()))?;
            let texts: Vec<String> = base
                .texts
                .iter()
                .filter(|t| t.trim() == text)
                .cloned()
                .collect();
            let visible = base.visible && !texts.is_empty();
            return Some(MockElement { texts, visible });
        }
        None
    }
}

type ClickHook = Box<dyn FnMut(&mut MockDom) + Send>;

struct Inner {
    dom: MockDom,
    hooks: HashMap<Selector, Vec<ClickHook>>,
}

/// Scripted [`PageDriver`] for unit tests and demos
pub struct MockPage {
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for MockPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPage").finish_non_exhaustive()
    }
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPage {
    /// Create an empty scripted page
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                dom: MockDom {
                    url: String::from("about:blank"),
                    ..MockDom::default()
                },
                hooks: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Script an element set
    pub fn insert(&self, selector: Selector, element: MockElement) {
        self.lock().dom.upsert(selector, element);
    }

    /// Register a hook that runs after `selector` is clicked
    pub fn on_click<F>(&self, selector: Selector, hook: F)
    where
        F: FnMut(&mut MockDom) + Send + 'static,
    {
        self.lock()
            .hooks
            .entry(selector)
            .or_default()
            .push(Box::new(hook));
    }

    /// Ordered snapshot of every recorded action
    #[must_use]
    pub fn log(&self) -> Vec<Recorded> {
        self.lock().dom.log.clone()
    }

    /// Last value filled into `selector`, if any
    #[must_use]
    pub fn last_fill(&self, selector: &Selector) -> Option<String> {
        self.lock().dom.fill_of(selector).map(str::to_string)
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn goto(&self, url: &str) -> ComprarResult<()> {
        let mut inner = self.lock();
        inner.dom.url = url.to_string();
        inner.dom.log.push(Recorded::Goto {
            url: url.to_string(),
        });
        Ok(())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        Ok(self.lock().dom.url.clone())
    }

    async fn click(&self, selector: &Selector, index: usize) -> ComprarResult<()> {
        let mut inner = self.lock();
        let resolved = inner.dom.resolve(selector);
        match resolved {
            Some(element) if index < element.texts.len() => {
                inner.dom.log.push(Recorded::Click {
                    selector: selector.clone(),
                    index,
                });
                let Inner { dom, hooks } = &mut *inner;
                if let Some(for_selector) = hooks.get_mut(selector) {
                    for hook in for_selector {
                        hook(dom);
                    }
                }
                Ok(())
            }
            _ => Err(ComprarError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn fill(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
        let mut inner = self.lock();
        if inner.dom.resolve(selector).is_none() {
            return Err(ComprarError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        let _ = inner
            .dom
            .fills
            .insert(selector.clone(), text.to_string());
        inner.dom.log.push(Recorded::Fill {
            selector: selector.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn hover(&self, selector: &Selector) -> ComprarResult<()> {
        let mut inner = self.lock();
        if inner.dom.resolve(selector).is_none() {
            return Err(ComprarError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        inner.dom.log.push(Recorded::Hover {
            selector: selector.clone(),
        });
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> ComprarResult<bool> {
        Ok(self
            .lock()
            .dom
            .resolve(selector)
            .is_some_and(|element| element.visible))
    }

    async fn visible_text(&self, selector: &Selector) -> ComprarResult<Option<String>> {
        Ok(self.lock().dom.resolve(selector).and_then(|element| {
            if element.visible {
                Some(element.texts.first().cloned().unwrap_or_default())
            } else {
                None
            }
        }))
    }

    async fn texts(&self, selector: &Selector) -> ComprarResult<Vec<String>> {
        Ok(self
            .lock()
            .dom
            .resolve(selector)
            .map(|element| element.texts)
            .unwrap_or_default())
    }

    async fn count(&self, selector: &Selector) -> ComprarResult<usize> {
        Ok(self
            .lock()
            .dom
            .resolve(selector)
            .map(|element| element.texts.len())
            .unwrap_or_default())
    }

    // Immediate check: the scripted DOM only changes through hooks, so
    // polling would never observe anything a single check cannot.
    async fn wait_for_visible(
        &self,
        selector: &Selector,
        _options: WaitOptions,
    ) -> ComprarResult<bool> {
        self.is_visible(selector).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn badge() -> Selector {
        Selector::css(".counter-number")
    }

    #[tokio::test]
    async fn test_absent_element_is_invisible_and_empty() {
        let page = MockPage::new();
        assert!(!page.is_visible(&badge()).await.unwrap());
        assert_eq!(page.visible_text(&badge()).await.unwrap(), None);
        assert_eq!(page.count(&badge()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_hidden_element_has_no_visible_text() {
        let page = MockPage::new();
        page.insert(badge(), MockElement::hidden(&["2"]));
        assert_eq!(page.count(&badge()).await.unwrap(), 1);
        assert_eq!(page.visible_text(&badge()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_click_missing_element_is_element_not_found() {
        let page = MockPage::new();
        let err = page.click(&badge(), 0).await.unwrap_err();
        assert!(matches!(err, ComprarError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_text_filter_resolves_against_base_entry() {
        let page = MockPage::new();
        page.insert(
            Selector::css(".swatch-option.text"),
            MockElement::visible(&["XS", "S", "M", "L", "XL"]),
        );
        let m = Selector::css(".swatch-option.text").with_text("M");
        assert_eq!(page.count(&m).await.unwrap(), 1);
        let missing = Selector::css(".swatch-option.text").with_text("XXL");
        assert_eq!(page.count(&missing).await.unwrap(), 0);
        assert!(!page.is_visible(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_click_hook_mutates_dom() {
        let page = MockPage::new();
        let button = Selector::css("#product-addtocart-button");
        page.insert(button.clone(), MockElement::visible(&["Add to Cart"]));
        page.on_click(button.clone(), |dom| {
            dom.upsert(
                Selector::css("[data-ui-id=\"message-success\"]"),
                MockElement::visible(&["You added Jacket to your shopping cart."]),
            );
        });

        let toast = Selector::css("[data-ui-id=\"message-success\"]");
        assert!(!page.is_visible(&toast).await.unwrap());
        page.click(&button, 0).await.unwrap();
        assert!(page.is_visible(&toast).await.unwrap());
    }

    #[tokio::test]
    async fn test_log_preserves_action_order() {
        let page = MockPage::new();
        let email = Selector::css("#email");
        let pass = Selector::css("#pass");
        page.insert(email.clone(), MockElement::visible(&[""]));
        page.insert(pass.clone(), MockElement::visible(&[""]));

        page.fill(&email, "a@b.c").await.unwrap();
        page.fill(&pass, "hunter2").await.unwrap();

        let log = page.log();
        assert_eq!(
            log,
            vec![
                Recorded::Fill {
                    selector: email,
                    text: "a@b.c".to_string()
                },
                Recorded::Fill {
                    selector: pass.clone(),
                    text: "hunter2".to_string()
                },
            ]
        );
        assert_eq!(page.last_fill(&pass), Some("hunter2".to_string()));
    }
}
