//! Account registration page object.
//!
//! Same shape as the login page, widened to five inputs and five
//! field-level error queries. Registration success is asynchronous
//! relative to submission, so `contact_info` actively waits (bounded)
//! for the contact block before applying the visible-or-empty read.

use crate::config::SuiteConfig;
use crate::data::RegistrationRecord;
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::ComprarResult;
use crate::wait::{poll_until, WaitOptions};

/// Fixed locator set for the registration screen
#[derive(Debug, Clone)]
pub struct RegisterLocators {
    /// First name input
    pub first_name: Locator,
    /// Last name input
    pub last_name: Locator,
    /// Email input
    pub email: Locator,
    /// Password input
    pub password: Locator,
    /// Password confirmation input
    pub confirm_password: Locator,
    /// Submit control
    pub create_account: Locator,
    /// Field-level errors, one per input
    pub first_name_error: Locator,
    /// Last name error
    pub last_name_error: Locator,
    /// Email error
    pub email_error: Locator,
    /// Password error
    pub password_error: Locator,
    /// Confirmation error
    pub confirm_password_error: Locator,
    /// Page-level error banner
    pub general_error: Locator,
    /// Post-registration account summary block
    pub contact_info: Locator,
}

impl RegisterLocators {
    /// Declare the registration screen's locators
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_name: Locator::new("first name", Selector::css("#firstname")),
            last_name: Locator::new("last name", Selector::css("#lastname")),
            email: Locator::new("email", Selector::css("#email_address")),
            password: Locator::new("password", Selector::css("#password")),
            confirm_password: Locator::new(
                "confirm password",
                Selector::css("#password-confirmation"),
            ),
            create_account: Locator::new(
                "create account",
                Selector::role("button", "Create an Account"),
            ),
            first_name_error: Locator::new("first name error", Selector::css("#firstname-error")),
            last_name_error: Locator::new("last name error", Selector::css("#lastname-error")),
            email_error: Locator::new("email error", Selector::css("#email_address-error")),
            password_error: Locator::new("password error", Selector::css("#password-error")),
            confirm_password_error: Locator::new(
                "confirm password error",
                Selector::css("#password-confirmation-error"),
            ),
            general_error: Locator::new(
                "general error",
                Selector::css(
                    r#"div[data-bind="html: $parent.prepareMessageForHtml(message.text)"]"#,
                ),
            ),
            contact_info: Locator::new(
                "contact info",
                Selector::css(".box.box-information .box-content p"),
            ),
        }
    }
}

impl Default for RegisterLocators {
    fn default() -> Self {
        Self::new()
    }
}

/// Page object for the registration screen
#[derive(Debug)]
pub struct RegisterPage<'a, D: PageDriver> {
    page: &'a D,
    locators: RegisterLocators,
    settle: WaitOptions,
    appear: WaitOptions,
}

impl<'a, D: PageDriver> RegisterPage<'a, D> {
    /// Create a registration page object over a live session handle
    #[must_use]
    pub fn new(page: &'a D, config: &SuiteConfig) -> Self {
        Self {
            page,
            locators: RegisterLocators::new(),
            settle: WaitOptions::new()
                .with_timeout(config.register_settle_ms)
                .with_poll_interval(config.poll_interval_ms),
            appear: WaitOptions::new()
                .with_timeout(config.default_timeout_ms)
                .with_poll_interval(config.poll_interval_ms),
        }
    }

    /// The declared locator set
    #[must_use]
    pub const fn locators(&self) -> &RegisterLocators {
        &self.locators
    }

    /// Fill the first name field
    pub async fn fill_first_name(&self, value: &str) -> ComprarResult<()> {
        self.page.fill(self.locators.first_name.selector(), value).await
    }

    /// Fill the last name field
    pub async fn fill_last_name(&self, value: &str) -> ComprarResult<()> {
        self.page.fill(self.locators.last_name.selector(), value).await
    }

    /// Fill the email field
    pub async fn fill_email(&self, value: &str) -> ComprarResult<()> {
        self.page.fill(self.locators.email.selector(), value).await
    }

    /// Fill the password field
    pub async fn fill_password(&self, value: &str) -> ComprarResult<()> {
        self.page.fill(self.locators.password.selector(), value).await
    }

    /// Fill the password confirmation field
    pub async fn fill_confirm_password(&self, value: &str) -> ComprarResult<()> {
        self.page
            .fill(self.locators.confirm_password.selector(), value)
            .await
    }

    /// Click the submit control
    pub async fn click_create_account(&self) -> ComprarResult<()> {
        self.page
            .click(self.locators.create_account.selector(), 0)
            .await
    }

    /// Fill all five fields left-to-right and submit
    pub async fn register(&self, record: &RegistrationRecord) -> ComprarResult<()> {
        tracing::debug!(email = %record.email, "register");
        self.fill_first_name(&record.first_name).await?;
        self.fill_last_name(&record.last_name).await?;
        self.fill_email(&record.email).await?;
        self.fill_password(&record.password).await?;
        self.fill_confirm_password(&record.confirm_password).await?;
        self.click_create_account().await
    }

    /// First name error; empty string when absent or hidden
    pub async fn first_name_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.first_name_error).await
    }

    /// Last name error; empty string when absent or hidden
    pub async fn last_name_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.last_name_error).await
    }

    /// Email error; empty string when absent or hidden
    pub async fn email_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.email_error).await
    }

    /// Password error; empty string when absent or hidden
    pub async fn password_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.password_error).await
    }

    /// Confirmation error; empty string when absent or hidden
    pub async fn confirm_password_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.confirm_password_error)
            .await
    }

    /// Page-level error banner; empty string when absent or hidden
    pub async fn general_error(&self) -> ComprarResult<String> {
        self.visible_or_empty(&self.locators.general_error).await
    }

    /// Post-registration account summary.
    ///
    /// Waits (bounded) for the contact block to appear first; a block
    /// that never appears reads as the empty string.
    pub async fn contact_info(&self) -> ComprarResult<String> {
        let appeared = self
            .page
            .wait_for_visible(self.locators.contact_info.selector(), self.appear)
            .await?;
        if !appeared {
            return Ok(String::new());
        }
        self.visible_or_empty(&self.locators.contact_info).await
    }

    /// Bounded synchronization point for validation rendering; same
    /// contract as the login page, shorter interval.
    pub async fn wait_for_errors(&self) {
        let settled = poll_until(self.settle, || async move {
            self.any_error_visible().await
        })
        .await;
        tracing::debug!(settled, "error settle");
    }

    async fn any_error_visible(&self) -> bool {
        for locator in [
            &self.locators.first_name_error,
            &self.locators.last_name_error,
            &self.locators.email_error,
            &self.locators.password_error,
            &self.locators.confirm_password_error,
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::RegisterFixtures;
    use crate::mock::{MockElement, MockPage, Recorded};

    fn fast_config() -> SuiteConfig {
        SuiteConfig {
            register_settle_ms: 50,
            default_timeout_ms: 50,
            poll_interval_ms: 5,
            ..SuiteConfig::default()
        }
    }

    fn form_page() -> MockPage {
        let page = MockPage::new();
        let locators = RegisterLocators::new();
        for locator in [
            &locators.first_name,
            &locators.last_name,
            &locators.email,
            &locators.password,
            &locators.confirm_password,
        ] {
            page.insert(locator.selector().clone(), MockElement::visible(&[""]));
        }
        page.insert(
            locators.create_account.selector().clone(),
            MockElement::visible(&["Create an Account"]),
        );
        page
    }

    #[tokio::test]
    async fn test_register_fills_left_to_right_then_submits() {
        let mock = form_page();
        let config = fast_config();
        let register = RegisterPage::new(&mock, &config);
        let record = RegisterFixtures::with_stamp("7").valid;

        register.register(&record).await.unwrap();

        let locators = RegisterLocators::new();
        let expected_order = [
            locators.first_name.selector().clone(),
            locators.last_name.selector().clone(),
            locators.email.selector().clone(),
            locators.password.selector().clone(),
            locators.confirm_password.selector().clone(),
        ];
        let log = mock.log();
        let fills: Vec<_> = log
            .iter()
            .filter_map(|r| match r {
                Recorded::Fill { selector, .. } => Some(selector.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, expected_order);
        assert!(matches!(
            log.last(),
            Some(Recorded::Click { selector, .. })
                if selector == locators.create_account.selector()
        ));
    }

    #[tokio::test]
    async fn test_all_error_queries_are_visible_or_empty() {
        let mock = form_page();
        let config = fast_config();
        let register = RegisterPage::new(&mock, &config);

        assert_eq!(register.first_name_error().await.unwrap(), "");
        assert_eq!(register.last_name_error().await.unwrap(), "");
        assert_eq!(register.email_error().await.unwrap(), "");
        assert_eq!(register.password_error().await.unwrap(), "");
        assert_eq!(register.confirm_password_error().await.unwrap(), "");
        assert_eq!(register.general_error().await.unwrap(), "");

        let locators = RegisterLocators::new();
        mock.insert(
            locators.confirm_password_error.selector().clone(),
            MockElement::visible(&["Please enter the same value again."]),
        );
        assert_eq!(
            register.confirm_password_error().await.unwrap(),
            "Please enter the same value again."
        );
    }

    #[tokio::test]
    async fn test_contact_info_empty_when_block_never_appears() {
        let mock = form_page();
        let config = fast_config();
        let register = RegisterPage::new(&mock, &config);
        assert_eq!(register.contact_info().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_contact_info_reads_block_once_visible() {
        let mock = form_page();
        let config = fast_config();
        let locators = RegisterLocators::new();
        mock.insert(
            locators.contact_info.selector().clone(),
            MockElement::visible(&["John Doe\njohn.doe.7@example.com"]),
        );
        let register = RegisterPage::new(&mock, &config);
        let info = register.contact_info().await.unwrap();
        assert!(info.contains("John Doe"));
        assert!(info.contains("john.doe.7@example.com"));
    }

    #[tokio::test]
    async fn test_empty_submission_passes_through() {
        let mock = form_page();
        let config = fast_config();
        let register = RegisterPage::new(&mock, &config);
        let record = RegisterFixtures::with_stamp("7").empty;

        register.register(&record).await.unwrap();

        let locators = RegisterLocators::new();
        assert_eq!(
            mock.last_fill(locators.email.selector()),
            Some(String::new())
        );
    }
}
