//! Scripted storefront demo.
//!
//! Drives the page objects against the in-memory [`MockPage`] — no
//! browser required. Shows the visible-or-empty contract, the
//! found-and-acted booleans, and store-side add-to-cart validation
//! modeled with click hooks.
//!
//! # Running
//!
//! ```bash
//! cargo run --example scripted_storefront -p comprar
//! ```

use comprar::prelude::*;

#[tokio::main]
async fn main() -> ComprarResult<()> {
    let config = SuiteConfig::new().with_base_url("https://shop.test");
    let page = MockPage::new();
    let product = ProductPage::new(&page, &config);
    let locators = product.locators().clone();

    // Script a product detail surface.
    page.insert(
        locators.size_options.selector().clone(),
        MockElement::visible(&["XS", "S", "M", "L", "XL"]),
    );
    page.insert(
        locators.color_options.selector().clone(),
        MockElement::visible(&["", ""]),
    );
    page.insert(locators.quantity.selector().clone(), MockElement::visible(&["1"]));
    page.insert(
        locators.add_to_cart.selector().clone(),
        MockElement::visible(&["Add to Cart"]),
    );

    // The "store" only confirms an add when size and color were picked.
    let size_m = locators.size_options.selector().clone().with_text("M");
    let color = locators.color_options.selector().clone();
    let toast = locators.success_message.selector().clone();
    page.on_click(locators.add_to_cart.selector().clone(), move |dom| {
        if dom.was_clicked(&size_m) && dom.was_clicked(&color) {
            dom.upsert(
                toast.clone(),
                MockElement::visible(&["You added Jacket to your shopping cart."]),
            );
        }
    });

    println!("=== Scripted storefront demo ===\n");

    // Queries on absent elements are empty, never errors.
    println!("success message before any add: {:?}", product.success_message().await?);
    println!("cart count before any add:      {}", product.cart_count().await?);

    // An unselected add is rejected store-side.
    product.add_to_cart().await?;
    println!(
        "\nunselected add confirmed? {}",
        product.is_product_added_to_cart().await?
    );

    // Out-of-range picks are a named negative outcome.
    println!("select_size(\"XXL\") acted? {}", product.select_size("XXL").await?);
    println!("select_color(9) acted?    {}", product.select_color(9).await?);

    // The real add.
    let selection = product.add_product_to_cart("M", 0, 1).await?;
    println!(
        "\nvalid add: size_selected={} color_selected={}",
        selection.size_selected, selection.color_selected
    );
    println!("confirmed? {}", product.is_product_added_to_cart().await?);
    println!("toast: {:?}", product.success_message().await?);

    println!("\n=== Demo complete ===");
    Ok(())
}
