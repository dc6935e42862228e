//! Locator abstraction for element selection.
//!
//! Locators are declarative: a selector expression plus options, rendered
//! into a DOM query only when the driver evaluates it. No locator ever
//! caches a live element handle, because element identity changes across
//! re-renders and navigations.
//!
//! Zero matches is not an error at declaration or query time. An action
//! on an absent element fails only at the driver layer, and only because
//! the action's precondition (something to act on) was not met.

use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// JS helper defining `visible(el)` for query expressions.
const VISIBLE_FN: &str = r#"const visible = (el) => { if (!el) return false; const s = window.getComputedStyle(el); return s.visibility !== "hidden" && s.display !== "none" && !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length); };"#;

/// Selector expression for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., `".swatch-option.text"`)
    Css(String),
    /// CSS selector filtered by exact trimmed text content
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text the element must equal after trimming
        text: String,
    },
    /// Accessible-role lookup filtered by exact accessible name.
    ///
    /// CDP has no first-class role query, so this renders to a CSS union
    /// for the role plus a name filter.
    Role {
        /// ARIA role (currently only "button" is exercised)
        role: String,
        /// Exact accessible name
        name: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a role selector with an exact accessible name
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Refine this selector with an exact-text filter.
    ///
    /// Used for index-free picks from an option list, e.g. the size
    /// swatch whose label equals `"M"`.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        match self {
            Self::Css(css) | Self::CssWithText { css, .. } => Self::CssWithText {
                css,
                text: text.into(),
            },
            role @ Self::Role { .. } => role,
        }
    }

    /// CSS union for a role lookup
    fn role_css(role: &str) -> String {
        match role {
            "button" => {
                r#"button, [role="button"], input[type="submit"], input[type="button"]"#.to_string()
            }
            other => format!("[role=\"{other}\"]"),
        }
    }

    /// JS expression evaluating to the array of matching elements
    #[must_use]
    pub fn to_array_expr(&self) -> String {
        match self {
            Self::Css(css) => format!("Array.from(document.querySelectorAll({css:?}))"),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter((el) => (el.innerText || el.textContent || \"\").trim() === {text:?})"
            ),
            Self::Role { role, name } => {
                let css = Self::role_css(role);
                format!(
                    "Array.from(document.querySelectorAll({css:?})).filter((el) => (el.innerText || el.value || el.getAttribute(\"aria-label\") || \"\").trim() === {name:?})"
                )
            }
        }
    }

    /// JS expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("({}).length", self.to_array_expr())
    }

    /// JS expression returning whether the first match is visible
    #[must_use]
    pub fn to_visibility_query(&self) -> String {
        format!(
            "(() => {{ const els = {}; {VISIBLE_FN} return visible(els[0]); }})()",
            self.to_array_expr()
        )
    }

    /// JS expression returning the first match's text when visible, else null
    #[must_use]
    pub fn to_visible_text_query(&self) -> String {
        format!(
            "(() => {{ const els = {}; {VISIBLE_FN} const el = els[0]; return visible(el) ? el.textContent : null; }})()",
            self.to_array_expr()
        )
    }

    /// JS expression returning a snapshot of every match's text content
    #[must_use]
    pub fn to_all_texts_query(&self) -> String {
        format!(
            "({}).map((el) => el.textContent || \"\")",
            self.to_array_expr()
        )
    }

    /// JS expression clicking the match at `index`; returns whether it acted
    #[must_use]
    pub fn to_click_query(&self, index: usize) -> String {
        format!(
            "(() => {{ const els = {}; const el = els[{index}]; if (!el) return false; el.scrollIntoView({{ block: \"center\" }}); el.click(); return true; }})()",
            self.to_array_expr()
        )
    }

    /// JS expression overwriting the first match's value; returns whether it acted.
    ///
    /// Dispatches `input` and `change` and blurs afterwards, because the
    /// storefront validates some fields on blur.
    #[must_use]
    pub fn to_fill_query(&self, text: &str) -> String {
        format!(
            "(() => {{ const els = {}; const el = els[0]; if (!el) return false; el.focus(); el.value = {text:?}; el.dispatchEvent(new Event(\"input\", {{ bubbles: true }})); el.dispatchEvent(new Event(\"change\", {{ bubbles: true }})); el.blur(); return true; }})()",
            self.to_array_expr()
        )
    }

    /// JS expression hovering the first match; returns whether it acted.
    ///
    /// Submenu items only enter the tree after the parent is hovered, so
    /// the full pointerover/mouseover/mouseenter sequence is dispatched.
    #[must_use]
    pub fn to_hover_query(&self) -> String {
        format!(
            "(() => {{ const els = {}; const el = els[0]; if (!el) return false; el.scrollIntoView({{ block: \"center\" }}); for (const t of [\"pointerover\", \"mouseover\", \"mouseenter\"]) {{ el.dispatchEvent(new MouseEvent(t, {{ bubbles: true }})); }} return true; }})()",
            self.to_array_expr()
        )
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::CssWithText { css, text } => write!(f, "{css} :text({text})"),
            Self::Role { role, name } => write!(f, "role={role}[name={name}]"),
        }
    }
}

/// Locator options for customizing wait behavior
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A named, immutable `(name, selector)` pair scoped to one page object.
///
/// Every action and query a page object performs references a `Locator`
/// declared at construction; the only mid-flow derivation allowed is the
/// exact-text refinement ([`Locator::with_text`]) and index-based picks
/// from a resolved list.
#[derive(Debug, Clone)]
pub struct Locator {
    name: &'static str,
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new named locator
    #[must_use]
    pub fn new(name: &'static str, selector: Selector) -> Self {
        Self {
            name,
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Refine with an exact-text filter
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.selector = self.selector.with_text(text);
        self
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Get the semantic name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_query() {
            let selector = Selector::css(".counter-number");
            let query = selector.to_count_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains(".counter-number"));
            assert!(query.contains(".length"));
        }

        #[test]
        fn test_with_text_refinement() {
            let selector = Selector::css(".swatch-option.text").with_text("M");
            assert!(matches!(selector, Selector::CssWithText { .. }));
            let query = selector.to_array_expr();
            assert!(query.contains("filter"));
            assert!(query.contains("\"M\""));
        }

        #[test]
        fn test_with_text_replaces_previous_filter() {
            let selector = Selector::css(".swatch-option.text")
                .with_text("M")
                .with_text("XL");
            match selector {
                Selector::CssWithText { text, .. } => assert_eq!(text, "XL"),
                other => panic!("unexpected selector: {other:?}"),
            }
        }

        #[test]
        fn test_role_selector_query() {
            let selector = Selector::role("button", "Sign In");
            let query = selector.to_array_expr();
            assert!(query.contains("role=\\\"button\\\"") || query.contains("[role="));
            assert!(query.contains("Sign In"));
        }

        #[test]
        fn test_visibility_query_checks_computed_style() {
            let query = Selector::css("#email-error").to_visibility_query();
            assert!(query.contains("getComputedStyle"));
            assert!(query.contains("visible(els[0])"));
        }

        #[test]
        fn test_visible_text_query_returns_null_when_hidden() {
            let query = Selector::css("#email-error").to_visible_text_query();
            assert!(query.contains("textContent"));
            assert!(query.contains("null"));
        }

        #[test]
        fn test_click_query_indexes_into_matches() {
            let query = Selector::css(".item.product.product-item").to_click_query(2);
            assert!(query.contains("els[2]"));
            assert!(query.contains("el.click()"));
            assert!(query.contains("return false"));
        }

        #[test]
        fn test_fill_query_dispatches_input_and_change() {
            let query = Selector::css("#qty").to_fill_query("3");
            assert!(query.contains("\"input\""));
            assert!(query.contains("\"change\""));
            assert!(query.contains("el.blur()"));
        }

        #[test]
        fn test_hover_query_dispatches_mouseenter() {
            let query = Selector::css("#ui-id-5").to_hover_query();
            assert!(query.contains("mouseover"));
            assert!(query.contains("mouseenter"));
        }

        #[test]
        fn test_selector_escapes_embedded_quotes() {
            let selector = Selector::css(r#"a[href*="/customer/account/logout/"]"#);
            let query = selector.to_array_expr();
            // The Rust debug formatting must escape the inner quotes so the
            // generated expression stays a single valid JS string literal.
            assert!(query.contains("\\\"/customer/account/logout/\\\""));
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_defaults() {
            let locator = Locator::new("email", Selector::css("#email"));
            assert_eq!(locator.name(), "email");
            assert_eq!(
                locator.options().timeout,
                Duration::from_millis(DEFAULT_TIMEOUT_MS)
            );
        }

        #[test]
        fn test_locator_with_timeout() {
            let locator = Locator::new("success", Selector::css("[data-ui-id=\"message-success\"]"))
                .with_timeout(Duration::from_secs(5));
            assert_eq!(locator.options().timeout, Duration::from_secs(5));
        }

        #[test]
        fn test_locator_display_is_semantic_name() {
            let locator = Locator::new("cart counter", Selector::css(".counter-number"));
            assert_eq!(locator.to_string(), "cart counter");
        }
    }
}
