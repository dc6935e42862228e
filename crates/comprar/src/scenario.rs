//! Scenario orchestration: checkpointed journeys over page objects.
//!
//! A scenario is a checkpointed pipeline, not a state machine: page
//! objects act, checkpoints compare observed state against the expected
//! fixture value, and the first mismatch aborts everything that follows
//! via `?`. There is no retry and no partial-success reporting; the
//! failure carries the expected and observed values so a mismatch is
//! diagnosable without a re-run.

use serde::Serialize;

use crate::config::SuiteConfig;
use crate::data::{
    LoginFixtures, ProductData, RegisterFixtures, ACCOUNT_URL_PATTERN, LOGIN_PATH, REGISTER_PATH,
};
use crate::driver::PageDriver;
use crate::pages::{LoginPage, ProductPage, RegisterPage};
use crate::result::{ComprarError, ComprarResult};

// ============================================================================
// Checkpoint helpers
// ============================================================================

/// Assert two values are equal
pub fn expect_eq<T: PartialEq + std::fmt::Debug>(
    checkpoint: &str,
    observed: &T,
    expected: &T,
) -> ComprarResult<()> {
    if observed == expected {
        tracing::info!(checkpoint, "checkpoint passed");
        Ok(())
    } else {
        Err(ComprarError::CheckpointFailed {
            checkpoint: checkpoint.to_string(),
            expected: format!("{expected:?}"),
            observed: format!("{observed:?}"),
        })
    }
}

/// Assert `haystack` contains `needle`
pub fn expect_contains(checkpoint: &str, haystack: &str, needle: &str) -> ComprarResult<()> {
    if haystack.contains(needle) {
        tracing::info!(checkpoint, "checkpoint passed");
        Ok(())
    } else {
        Err(ComprarError::CheckpointFailed {
            checkpoint: checkpoint.to_string(),
            expected: format!("text containing {needle:?}"),
            observed: format!("{haystack:?}"),
        })
    }
}

/// Assert a condition holds
pub fn expect_true(checkpoint: &str, observed: bool) -> ComprarResult<()> {
    if observed {
        tracing::info!(checkpoint, "checkpoint passed");
        Ok(())
    } else {
        Err(ComprarError::CheckpointFailed {
            checkpoint: checkpoint.to_string(),
            expected: "true".to_string(),
            observed: "false".to_string(),
        })
    }
}

/// Assert a URL matches a regex pattern
pub fn expect_url_matches(checkpoint: &str, url: &str, pattern: &str) -> ComprarResult<()> {
    let re = regex::Regex::new(pattern).map_err(|e| ComprarError::UrlPatternError {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    if re.is_match(url) {
        tracing::info!(checkpoint, url, "checkpoint passed");
        Ok(())
    } else {
        Err(ComprarError::CheckpointFailed {
            checkpoint: checkpoint.to_string(),
            expected: format!("URL matching /{pattern}/"),
            observed: url.to_string(),
        })
    }
}

// ============================================================================
// The shopping journey
// ============================================================================

/// Outcome summary of a completed journey
#[derive(Debug, Clone, Serialize)]
pub struct JourneyReport {
    /// Number of checkpoints that passed (all of them, if this exists)
    pub checkpoints_passed: u32,
    /// Email the run registered with
    pub registered_email: String,
    /// Cart count at the end of the journey
    pub cart_count: u32,
}

/// The single end-to-end user journey:
/// register → verify → sign out → log in → browse to jackets → open a
/// product → invalid add (expect rejection) → valid add (expect
/// confirmation and an exact cart increment).
#[derive(Debug, Clone)]
pub struct ShoppingJourney {
    config: SuiteConfig,
    register: RegisterFixtures,
    login: LoginFixtures,
    product: ProductData,
}

impl ShoppingJourney {
    /// Build a journey with a fresh clock stamp for the registered email
    #[must_use]
    pub fn new(config: SuiteConfig) -> Self {
        let stamp = crate::data::unique_stamp();
        Self::with_stamp(config, &stamp)
    }

    /// Build a journey from an explicit stamp; identical stamps replay
    /// identical fixtures
    #[must_use]
    pub fn with_stamp(config: SuiteConfig, stamp: &str) -> Self {
        let register = RegisterFixtures::with_stamp(stamp);
        let login = LoginFixtures::standard();
        let product = ProductData::jackets(&config);
        Self {
            config,
            register,
            login,
            product,
        }
    }

    /// The registration fixtures this journey runs with
    #[must_use]
    pub const fn register_fixtures(&self) -> &RegisterFixtures {
        &self.register
    }

    /// The product parameters this journey runs with
    #[must_use]
    pub const fn product_data(&self) -> &ProductData {
        &self.product
    }

    /// Run the journey to completion or the first failed checkpoint.
    pub async fn run<D: PageDriver>(&self, page: &D) -> ComprarResult<JourneyReport> {
        let register_page = RegisterPage::new(page, &self.config);
        let login_page = LoginPage::new(page, &self.config);
        let product_page = ProductPage::new(page, &self.config);
        let mut passed = 0u32;

        // Register a fresh account.
        tracing::info!(email = %self.register.valid.email, "registering");
        page.goto(&self.config.url(REGISTER_PATH)).await?;
        register_page.register(&self.register.valid).await?;

        let url = page.current_url().await?;
        expect_url_matches("registration lands on account", &url, ACCOUNT_URL_PATTERN)?;
        passed += 1;

        let contact = register_page.contact_info().await?;
        expect_contains(
            "contact block shows full name",
            &contact,
            &self.register.valid.full_name(),
        )?;
        passed += 1;
        expect_contains("contact block shows email", &contact, &self.register.valid.email)?;
        passed += 1;

        // Sign out, then back in with the known-good account.
        login_page.sign_out().await?;
        page.goto(&self.config.url(LOGIN_PATH)).await?;
        login_page
            .login(&self.login.valid.email, &self.login.valid.password)
            .await?;

        let url = page.current_url().await?;
        expect_url_matches("login lands on account", &url, ACCOUNT_URL_PATTERN)?;
        passed += 1;

        // Browse to the jackets category.
        product_page.navigate_to_men_jackets().await?;
        let url = page.current_url().await?;
        expect_eq("jackets category url", &url, &self.product.category_url)?;
        passed += 1;

        let items = product_page.product_items().await?;
        tracing::info!(tiles = items.len(), "listing loaded");
        expect_true("jackets listing is non-empty", !items.is_empty())?;
        passed += 1;

        // Open the first product.
        expect_true("first tile opened", product_page.click_product(0).await?)?;
        passed += 1;

        let locators = product_page.locators();
        expect_true(
            "add-to-cart control visible",
            page.is_visible(locators.add_to_cart.selector()).await?,
        )?;
        passed += 1;
        expect_true(
            "size options offered",
            page.count(locators.size_options.selector()).await? > 0,
        )?;
        passed += 1;
        expect_true(
            "color options offered",
            page.count(locators.color_options.selector()).await? > 0,
        )?;
        passed += 1;

        // An add without selections must be rejected store-side.
        product_page.add_to_cart().await?;
        expect_true(
            "unselected add is rejected",
            !product_page.is_product_added_to_cart().await?,
        )?;
        passed += 1;

        // The real add: size, color, quantity, submit.
        let before = product_page.cart_count().await?;
        let selection = product_page
            .add_product_to_cart(&self.product.default_size, 0, self.product.default_quantity)
            .await?;
        expect_true("size and color selections applied", selection.complete())?;
        passed += 1;
        expect_true(
            "selected add is confirmed",
            product_page.is_product_added_to_cart().await?,
        )?;
        passed += 1;

        let message = product_page.success_message().await?;
        expect_contains(
            "confirmation names the add",
            &message,
            &self.product.success_fragment,
        )?;
        passed += 1;

        let after = product_page.cart_count().await?;
        expect_eq(
            "cart count incremented by quantity",
            &after,
            &(before + self.product.default_quantity),
        )?;
        passed += 1;

        tracing::info!(passed, cart_count = after, "journey complete");
        Ok(JourneyReport {
            checkpoints_passed: passed,
            registered_email: self.register.valid.email.clone(),
            cart_count: after,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use crate::mock::{MockElement, MockPage, Recorded};
    use crate::pages::{LoginLocators, ProductLocators, RegisterLocators};

    mod checkpoint_tests {
        use super::*;

        #[test]
        fn test_expect_eq_mismatch_carries_both_values() {
            let err = expect_eq("cart count", &3u32, &4u32).unwrap_err();
            match err {
                ComprarError::CheckpointFailed {
                    checkpoint,
                    expected,
                    observed,
                } => {
                    assert_eq!(checkpoint, "cart count");
                    assert_eq!(expected, "4");
                    assert_eq!(observed, "3");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_expect_contains() {
            assert!(expect_contains("toast", "You added Jacket", "You added").is_ok());
            assert!(expect_contains("toast", "Something else", "You added").is_err());
        }

        #[test]
        fn test_expect_url_matches() {
            assert!(expect_url_matches(
                "account",
                "https://shop.test/customer/account/",
                "/customer/account/"
            )
            .is_ok());
            assert!(expect_url_matches(
                "account",
                "https://shop.test/checkout/",
                "/customer/account/"
            )
            .is_err());
        }

        #[test]
        fn test_expect_url_matches_rejects_bad_pattern() {
            let err = expect_url_matches("broken", "https://shop.test/", "[").unwrap_err();
            assert!(matches!(err, ComprarError::UrlPatternError { .. }));
        }
    }

    mod journey_tests {
        use super::*;

        const STAMP: &str = "1700000000000";

        fn scripted_config() -> SuiteConfig {
            SuiteConfig {
                base_url: "https://shop.test".to_string(),
                default_timeout_ms: 50,
                cart_confirm_ms: 50,
                error_settle_ms: 50,
                register_settle_ms: 50,
                poll_interval_ms: 5,
                ..SuiteConfig::default()
            }
        }

        /// Script a storefront that behaves like the real one for the
        /// happy path: registration and login land on the account page,
        /// the jackets menu navigates, and the add-to-cart endpoint only
        /// confirms when a size and a color were picked first.
        fn scripted_storefront(config: &SuiteConfig) -> MockPage {
            let page = MockPage::new();
            let login = LoginLocators::new();
            let register = RegisterLocators::new();
            let product = ProductLocators::new();

            // Forms and header chrome.
            for locator in [
                &register.first_name,
                &register.last_name,
                &register.email,
                &register.password,
                &register.confirm_password,
            ] {
                page.insert(locator.selector().clone(), MockElement::visible(&[""]));
            }
            page.insert(
                register.create_account.selector().clone(),
                MockElement::visible(&["Create an Account"]),
            );
            page.insert(login.email.selector().clone(), MockElement::visible(&[""]));
            page.insert(login.password.selector().clone(), MockElement::visible(&[""]));
            page.insert(
                login.sign_in.selector().clone(),
                MockElement::visible(&["Sign In"]),
            );
            page.insert(
                login.menu_toggle.selector().clone(),
                MockElement::visible(&["Change"]),
            );
            page.insert(
                login.sign_out_link.selector().clone(),
                MockElement::visible(&["Sign Out"]),
            );

            // Menu tree.
            page.insert(product.men_menu.selector().clone(), MockElement::visible(&["Men"]));
            page.insert(
                product.tops_submenu.selector().clone(),
                MockElement::visible(&["Tops"]),
            );
            page.insert(
                product.jackets_submenu.selector().clone(),
                MockElement::visible(&["Jackets"]),
            );

            // Product detail surface.
            page.insert(
                product.size_options.selector().clone(),
                MockElement::visible(&["XS", "S", "M", "L", "XL"]),
            );
            page.insert(
                product.color_options.selector().clone(),
                MockElement::visible(&["", ""]),
            );
            page.insert(product.quantity.selector().clone(), MockElement::visible(&["1"]));
            page.insert(
                product.add_to_cart.selector().clone(),
                MockElement::visible(&["Add to Cart"]),
            );

            // Registration submits to the account page and renders the
            // contact block.
            let account_url = config.url("/customer/account/");
            let contact = register.contact_info.selector().clone();
            let email = RegisterFixtures::with_stamp(STAMP).valid.email;
            let contact_text = format!("John Doe\n{email}");
            let url_after_register = account_url.clone();
            page.on_click(register.create_account.selector().clone(), move |dom| {
                dom.url = url_after_register.clone();
                let text = contact_text.clone();
                dom.upsert(contact.clone(), MockElement::visible(&[text.as_str()]));
            });

            // Login submits to the account page.
            let url_after_login = account_url;
            page.on_click(login.sign_in.selector().clone(), move |dom| {
                dom.url = url_after_login.clone();
            });

            // The jackets submenu navigates to the category listing.
            let category_url = config.url(crate::data::JACKETS_PATH);
            let tiles = product.product_items.selector().clone();
            page.on_click(product.jackets_submenu.selector().clone(), move |dom| {
                dom.url = category_url.clone();
                dom.upsert(
                    tiles.clone(),
                    MockElement::visible(&["Proteus Fitness Jackshirt", "Montana Wind Jacket"]),
                );
            });

            // Store-side add-to-cart validation: only a selected add
            // renders the toast and bumps the badge.
            let size_m = product.size_options.selector().clone().with_text("M");
            let color = product.color_options.selector().clone();
            let qty = product.quantity.selector().clone();
            let counter = product.cart_counter.selector().clone();
            let toast = product.success_message.selector().clone();
            page.on_click(product.add_to_cart.selector().clone(), move |dom| {
                if !(dom.was_clicked(&size_m) && dom.was_clicked(&color)) {
                    return;
                }
                let added: u32 = dom
                    .fill_of(&qty)
                    .and_then(|text| text.trim().parse().ok())
                    .unwrap_or(1);
                let before: u32 = dom
                    .element(&counter)
                    .and_then(|el| el.texts.first())
                    .and_then(|text| text.trim().parse().ok())
                    .unwrap_or(0);
                dom.upsert(
                    toast.clone(),
                    MockElement::visible(&["You added Jacket to your shopping cart."]),
                );
                let badge = (before + added).to_string();
                dom.upsert(counter.clone(), MockElement::visible(&[badge.as_str()]));
            });

            page
        }

        #[tokio::test]
        async fn test_full_journey_passes_every_checkpoint() {
            let config = scripted_config();
            let page = scripted_storefront(&config);
            let journey = ShoppingJourney::with_stamp(config, STAMP);

            let report = journey.run(&page).await.unwrap();

            assert_eq!(report.checkpoints_passed, 15);
            assert_eq!(report.cart_count, 1);
            assert_eq!(
                report.registered_email,
                format!("john.doe.{STAMP}@example.com")
            );
        }

        #[tokio::test]
        async fn test_identical_stamps_register_identical_emails() {
            let config = scripted_config();
            let a = ShoppingJourney::with_stamp(config.clone(), "99");
            let b = ShoppingJourney::with_stamp(config, "99");
            assert_eq!(
                a.register_fixtures().valid.email,
                b.register_fixtures().valid.email
            );
        }

        #[tokio::test]
        async fn test_failed_checkpoint_aborts_remaining_scenario() {
            let config = scripted_config();
            let page = scripted_storefront(&config);

            // Sabotage the category navigation: the submenu click now
            // lands somewhere else entirely.
            let product = ProductLocators::new();
            page.on_click(product.jackets_submenu.selector().clone(), |dom| {
                dom.url = "https://shop.test/sale.html".to_string();
            });

            let journey = ShoppingJourney::with_stamp(config, STAMP);
            let err = journey.run(&page).await.unwrap_err();

            match err {
                ComprarError::CheckpointFailed { checkpoint, .. } => {
                    assert_eq!(checkpoint, "jackets category url");
                }
                other => panic!("unexpected error: {other:?}"),
            }

            // Nothing after the failed checkpoint ran: the add-to-cart
            // control was never clicked.
            let add_clicks = page
                .log()
                .iter()
                .filter(|r| {
                    matches!(
                        r,
                        Recorded::Click { selector, .. }
                            if selector == &Selector::css("#product-addtocart-button")
                    )
                })
                .count();
            assert_eq!(add_clicks, 0);
        }
    }
}
