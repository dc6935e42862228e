//! Comprador: CLI runner for the storefront shopping journey.
//!
//! ## Usage
//!
//! ```bash
//! comprador                                  # run against the default storefront
//! comprador --base-url http://localhost:8080 # target another deployment
//! comprador --headed -v                      # watch the browser, debug logs
//! comprador --stamp 1700000000000 --json     # replayable run, JSON report
//! ```

use clap::Parser;
use comprar::prelude::*;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run the storefront E2E shopping journey
#[derive(Parser, Debug)]
#[command(name = "comprador", version, about)]
struct Cli {
    /// Storefront base URL
    #[arg(
        long,
        env = "COMPRAR_BASE_URL",
        default_value = comprar::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Path to the chromium binary
    #[arg(long, env = "CHROMIUM_PATH")]
    chromium_path: Option<String>,

    /// Fixed uniqueness stamp for replayable runs (default: clock)
    #[arg(long)]
    stamp: Option<String>,

    /// Print the journey report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence progress output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "browser")]
async fn run(cli: Cli) -> ComprarResult<()> {
    let mut config = SuiteConfig::new()
        .with_base_url(cli.base_url)
        .with_headless(!cli.headed);
    if let Some(path) = cli.chromium_path {
        config = config.with_chromium_path(path);
    }

    let journey = match cli.stamp.as_deref() {
        Some(stamp) => ShoppingJourney::with_stamp(config.clone(), stamp),
        None => ShoppingJourney::new(config.clone()),
    };

    if !cli.quiet {
        println!(
            "{} register → verify → sign out → log in → browse → add to cart",
            style("journey:").cyan().bold()
        );
        println!("{} {}", style("target:").cyan().bold(), config.base_url);
    }

    let driver = CdpDriver::launch(config).await?;
    let outcome = journey.run(&driver).await;
    driver.close().await?;
    let report = outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        println!(
            "{} {} checkpoints, registered {}, cart at {}",
            style("pass:").green().bold(),
            report.checkpoints_passed,
            report.registered_email,
            report.cart_count
        );
    }
    Ok(())
}

#[cfg(not(feature = "browser"))]
async fn run(_cli: Cli) -> ComprarResult<()> {
    Err(ComprarError::BrowserLaunchError {
        message: "browser feature not enabled. Rebuild with --features browser".to_string(),
    })
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("comprar={level},comprador={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
