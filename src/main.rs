//! scholastic CLI - Entry point
//!
//! Usage: scholastic [--data <FILE>] [--config <FILE>] [--auto-init]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scholastic::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the console protocol
    let filter = if cli.verbose {
        EnvFilter::new("scholastic=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    scholastic::cli::run(cli)
}
