//! Product browsing and cart page object.

use crate::config::SuiteConfig;
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::{ComprarError, ComprarResult};
use crate::wait::WaitOptions;

/// Fixed locator set for category listing, product detail, and cart
#[derive(Debug, Clone)]
pub struct ProductLocators {
    /// Top-level "Men" menu entry
    pub men_menu: Locator,
    /// "Tops" submenu entry
    pub tops_submenu: Locator,
    /// "Jackets" submenu entry
    pub jackets_submenu: Locator,
    /// Product tiles on a category listing
    pub product_items: Locator,
    /// Size swatches on the detail page
    pub size_options: Locator,
    /// Color swatches on the detail page
    pub color_options: Locator,
    /// Quantity input
    pub quantity: Locator,
    /// Add-to-cart control
    pub add_to_cart: Locator,
    /// Cart badge counter
    pub cart_counter: Locator,
    /// Success toast
    pub success_message: Locator,
}

impl ProductLocators {
    /// Declare the product surfaces' locators
    #[must_use]
    pub fn new() -> Self {
        Self {
            men_menu: Locator::new("men menu", Selector::css("#ui-id-5")),
            tops_submenu: Locator::new("tops submenu", Selector::css("#ui-id-17")),
            jackets_submenu: Locator::new("jackets submenu", Selector::css("#ui-id-19")),
            product_items: Locator::new(
                "product items",
                Selector::css(".item.product.product-item"),
            ),
            size_options: Locator::new("size options", Selector::css(".swatch-option.text")),
            color_options: Locator::new("color options", Selector::css(".swatch-option.color")),
            quantity: Locator::new("quantity", Selector::css("#qty")),
            add_to_cart: Locator::new(
                "add to cart",
                Selector::css("#product-addtocart-button"),
            ),
            cart_counter: Locator::new("cart counter", Selector::css(".counter-number")),
            success_message: Locator::new(
                "success message",
                Selector::css(r#"[data-ui-id="message-success"]"#),
            ),
        }
    }
}

impl Default for ProductLocators {
    fn default() -> Self {
        Self::new()
    }
}

/// Which of the optional selections a composite add actually applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// A size swatch matched and was clicked
    pub size_selected: bool,
    /// A color swatch existed at the index and was clicked
    pub color_selected: bool,
}

impl Selection {
    /// Both selections found their target
    #[must_use]
    pub const fn complete(&self) -> bool {
        self.size_selected && self.color_selected
    }
}

/// Page object for category browsing, product detail, and the cart badge
#[derive(Debug)]
pub struct ProductPage<'a, D: PageDriver> {
    page: &'a D,
    locators: ProductLocators,
    listing: WaitOptions,
    confirm: WaitOptions,
}

impl<'a, D: PageDriver> ProductPage<'a, D> {
    /// Create a product page object over a live session handle
    #[must_use]
    pub fn new(page: &'a D, config: &SuiteConfig) -> Self {
        Self {
            page,
            locators: ProductLocators::new(),
            listing: WaitOptions::new()
                .with_timeout(config.default_timeout_ms)
                .with_poll_interval(config.poll_interval_ms),
            confirm: WaitOptions::new()
                .with_timeout(config.cart_confirm_ms)
                .with_poll_interval(config.poll_interval_ms),
        }
    }

    /// The declared locator set
    #[must_use]
    pub const fn locators(&self) -> &ProductLocators {
        &self.locators
    }

    /// Hover Men, hover Tops, click Jackets — strictly in that order.
    ///
    /// The submenus are not in the tree until their parent is hovered.
    pub async fn navigate_to_men_jackets(&self) -> ComprarResult<()> {
        tracing::debug!("navigate Men > Tops > Jackets");
        self.page.hover(self.locators.men_menu.selector()).await?;
        self.page.hover(self.locators.tops_submenu.selector()).await?;
        self.page
            .click(self.locators.jackets_submenu.selector(), 0)
            .await
    }

    /// Wait for at least one tile, then snapshot the listing's tile texts.
    ///
    /// The snapshot does not re-evaluate after DOM changes; a listing
    /// that never renders reads as empty.
    pub async fn product_items(&self) -> ComprarResult<Vec<String>> {
        let appeared = self
            .page
            .wait_for_visible(self.locators.product_items.selector(), self.listing)
            .await?;
        if !appeared {
            return Ok(Vec::new());
        }
        self.page.texts(self.locators.product_items.selector()).await
    }

    /// Click the tile at `index`; `Ok(false)` when the index is out of
    /// bounds (no error, no state change).
    pub async fn click_product(&self, index: usize) -> ComprarResult<bool> {
        as_acted(
            self.page
                .click(self.locators.product_items.selector(), index)
                .await,
        )
    }

    /// Click the size swatch whose label equals `size`; `Ok(false)` when
    /// no swatch matches.
    pub async fn select_size(&self, size: &str) -> ComprarResult<bool> {
        let swatch = self.locators.size_options.selector().clone().with_text(size);
        as_acted(self.page.click(&swatch, 0).await)
    }

    /// Click the color swatch at `index`; `Ok(false)` when the index is
    /// out of bounds.
    pub async fn select_color(&self, index: usize) -> ComprarResult<bool> {
        as_acted(
            self.page
                .click(self.locators.color_options.selector(), index)
                .await,
        )
    }

    /// Overwrite the quantity field with the stringified integer
    pub async fn set_quantity(&self, quantity: u32) -> ComprarResult<()> {
        self.page
            .fill(self.locators.quantity.selector(), &quantity.to_string())
            .await
    }

    /// Trigger the add-to-cart control with no precondition check.
    ///
    /// Calling this before size/color are selected is legal; the store
    /// rejects the add and no success toast appears. A missing control
    /// is a propagated failure.
    pub async fn add_to_cart(&self) -> ComprarResult<()> {
        self.page.click(self.locators.add_to_cart.selector(), 0).await
    }

    /// Composite: size → color → quantity → submit.
    ///
    /// Returns which optional selections actually found their target so
    /// callers can decide whether a miss is an error.
    pub async fn add_product_to_cart(
        &self,
        size: &str,
        color_index: usize,
        quantity: u32,
    ) -> ComprarResult<Selection> {
        let size_selected = self.select_size(size).await?;
        let color_selected = self.select_color(color_index).await?;
        self.set_quantity(quantity).await?;
        self.add_to_cart().await?;
        let selection = Selection {
            size_selected,
            color_selected,
        };
        if !selection.complete() {
            tracing::warn!(
                size_selected = selection.size_selected,
                color_selected = selection.color_selected,
                "add submitted with incomplete selection"
            );
        }
        Ok(selection)
    }

    /// Bounded poll for the success toast; `false` on timeout is the
    /// expected negative for a rejected add, not a failure.
    pub async fn is_product_added_to_cart(&self) -> ComprarResult<bool> {
        self.page
            .wait_for_visible(self.locators.success_message.selector(), self.confirm)
            .await
    }

    /// Parse the cart badge; `0` for a missing or unreadable badge
    pub async fn cart_count(&self) -> ComprarResult<u32> {
        let badge = self
            .page
            .visible_text(self.locators.cart_counter.selector())
            .await?;
        Ok(badge
            .map(|text| text.trim().parse::<u32>().unwrap_or(0))
            .unwrap_or(0))
    }

    /// Success toast text; empty string when absent or hidden
    pub async fn success_message(&self) -> ComprarResult<String> {
        Ok(self
            .page
            .visible_text(self.locators.success_message.selector())
            .await?
            .unwrap_or_default())
    }

}

// Out-of-bounds and unmatched-filter picks are a named negative
// outcome, not an error.
fn as_acted(outcome: ComprarResult<()>) -> ComprarResult<bool> {
    match outcome {
        Ok(()) => Ok(true),
        Err(ComprarError::ElementNotFound { .. }) => Ok(false),
        Err(other) => Err(other),
    }
}
