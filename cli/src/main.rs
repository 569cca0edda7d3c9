//! dirctl - Operator tool for the configuration-backed directory.
//!
//! Runs bind and search requests against a configuration file without a
//! directory-protocol server in front of it.

mod args;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check => commands::check::execute(&cli.config),
        Commands::Bind(args) => commands::bind::execute(args, &cli.config).await,
        Commands::Search(args) => commands::search::execute(args, &cli.config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
