//! Authentication page object.

use crate::config::SuiteConfig;
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::ComprarResult;
use crate::wait::{poll_until, WaitOptions};

/// Fixed locator set for the login screen
#[derive(Debug, Clone)]
pub struct LoginLocators {
    /// Email input
    pub email: Locator,
    /// Password input
    pub password: Locator,
    /// Submit control
    pub sign_in: Locator,
    /// Field-level email error
    pub email_error: Locator,
    /// Field-level password error
    pub password_error: Locator,
    /// Page-level error banner
    pub general_error: Locator,
    /// Post-auth account summary block
    pub contact_info: Locator,
    /// Customer menu toggle in the header
    pub menu_toggle: Locator,
    /// Sign-out link inside the customer menu
    pub sign_out_link: Locator,
}

impl LoginLocators {
    /// Declare the login screen's locators
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: Locator::new("email", Selector::css("#email")),
            password: Locator::new(
                "password",
                Selector::css(r#"#pass[name="login[password]"]"#),
            ),
            sign_in: Locator::new("sign in", Selector::role("button", "Sign In")),
            email_error: Locator::new("email error", Selector::css("#email-error")),
            password_error: Locator::new("password error", Selector::css("#pass-error")),
            general_error: Locator::new(
                "general error",
                Selector::css(
                    r#".message-error div[data-bind="html: $parent.prepareMessageForHtml(message.text)"]"#,
                ),
            ),
            contact_info: Locator::new(
                "contact info",
                Selector::css(".box.box-information .box-content p"),
            ),
            menu_toggle: Locator::new(
                "customer menu toggle",
                Selector::css(
                    r#".header.links button.action.switch[data-action="customer-menu-toggle"]"#,
                ),
            ),
            sign_out_link: Locator::new(
                "sign out link",
                Selector::css(r#"a[href*="/customer/account/logout/"]"#),
            ),
        }
    }
}

impl Default for LoginLocators {
    fn default() -> Self {
        Self::new()
    }
}

/// Page object for the login screen
#[derive(Debug)]
pub struct LoginPage<'a, D: PageDriver> {
    page: &'a D,
    locators: LoginLocators,
    settle: WaitOptions,
}

impl<'a, D: PageDriver> LoginPage<'a, D> {
    /// Create a login page object over a live session handle
    #[must_use]
    pub fn new(page: &'a D, config: &SuiteConfig) -> Self {
        Self {
            page,
            locators: LoginLocators::new(),
            settle: WaitOptions::new()
                .with_timeout(config.error_settle_ms)
                .with_poll_interval(config.poll_interval_ms),
        }
    }

    /// The declared locator set
    #[must_use]
    pub const fn locators(&self) -> &LoginLocators {
        &self.locators
    }

    /// Fill the email field; the raw value passes through, empty included
    pub async fn fill_email(&self, email: &str) -> ComprarResult<()> {
        self.page.fill(self.locators.email.selector(), email).await
    }

    /// Fill the password field
    pub async fn fill_password(&self, password: &str) -> ComprarResult<()> {
        self.page
            .fill(self.locators.password.selector(), password)
            .await
    }

    /// Click the submit control.
    ///
    /// Does not wait for navigation; that is the caller's business.
    pub async fn click_sign_in(&self) -> ComprarResult<()> {
        self.page.click(self.locators.sign_in.selector(), 0).await
    }

    /// Fill both fields and submit.
    ///
    /// Email is always filled before password: the storefront validates
    /// on blur, and the order is observable.
    pub async fn login(&self, email: &str, password: &str) -> ComprarResult<()> {
        tracing::debug!(email, "login");
        self.fill_email(email).await?;
        self.fill_password(password).await?;
        self.click_sign_in().await
    }

    /// Field-level email error; empty string when absent or hidden
    pub async fn email_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.email_error).await
    }

    /// Field-level password error; empty string when absent or hidden
    pub async fn password_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.password_error).await
    }

    /// Page-level error banner; empty string when absent or hidden
    pub async fn general_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.general_error).await
    }

    /// Post-auth account summary; empty string when absent or hidden
    pub async fn contact_info(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.contact_info).await
    }

    /// Bounded synchronization point for asynchronous client-side
    /// validation rendering.
    ///
    /// Polls until some error element is visible or the settle interval
    /// elapses; either way the method returns normally, preserving the
    /// historical zero-argument call contract.
    pub async fn wait_for_errors(&self) {
        let settled = poll_until(self.settle, || async move {
            self.any_error_visible().await
        })
        .await;
        tracing::debug!(settled, "error settle");
    }

    /// Sign the current customer out through the header menu
    pub async fn sign_out(&self) -> ComprarResult<()> {
        tracing::debug!("sign out");
        self.page.click(self.locators.menu_toggle.selector(), 0).await?;
        self.page
            .click(self.locators.sign_out_link.selector(), 0)
            .await
    }

    async fn any_error_visible(&self) -> bool {
        for locator in [
            &self.locators.email_error,
            &self.locators.password_error,
            &self.locators.general_error,
        ] {
            if self
                .page
                .is_visible(locator.selector())
                .await
                .unwrap_or(false)
            {
                return true;
            }
        }
        false
    }

    async fn visible_or_empty(&self, locator: &Locator) -> ComprarResult<String> {
        Ok(self
            .page
            .visible_text(locator.selector())
            .await?
            .unwrap_or_default())
    }
}
