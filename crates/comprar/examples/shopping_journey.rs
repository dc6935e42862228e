//! Full shopping journey against the live storefront.
//!
//! Launches headless Chromium over CDP and runs the checkpointed
//! register → login → browse → add-to-cart pipeline.
//!
//! # Running
//!
//! ```bash
//! cargo run --example shopping_journey -p comprar --features browser
//! ```
//!
//! Set `COMPRAR_BASE_URL` to target another deployment and
//! `CHROMIUM_PATH` to pin the browser binary.

use comprar::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ComprarResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SuiteConfig::from_env();
    let journey = ShoppingJourney::new(config.clone());

    let driver = CdpDriver::launch(config).await?;
    let outcome = journey.run(&driver).await;
    driver.close().await?;

    let report = outcome?;
    println!(
        "journey passed: {} checkpoints, registered {}, cart at {}",
        report.checkpoints_passed, report.registered_email, report.cart_count
    );
    Ok(())
}
