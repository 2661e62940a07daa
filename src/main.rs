use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use venuepulse::cli::{self, Cli};

fn main() -> Result<()> {
    // Initialize tracing with structured JSON logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "VenuePulse starting up");

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    cli::run(cli)?;

    info!("VenuePulse completed successfully");
    Ok(())
}
