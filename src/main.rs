//! entra-uri-finder
//!
//! Finds Entra ID application registrations whose redirect, home page or
//! logout URIs contain a search string, and lists their owners.
//!
//! The app registration used to sign in needs the `Application.Read.All`
//! application permission, plus `User.Read.All` for owner display names,
//! with admin consent granted in the tenant.

#![deny(clippy::all)]

mod app;
mod auth;
mod config;
mod error;
mod graph;
mod report;
mod search;
mod secure;

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{ApiConfig, Config};
use error::AppError;
use report::Reporter;

fn main() -> ExitCode {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    init_logging();

    info!("Starting entra-uri-finder v{}", env!("CARGO_PKG_VERSION"));

    let mut reporter = Reporter::stdout();

    match run(&mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize tracing/logging.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

fn run(reporter: &mut Reporter<std::io::Stdout>) -> Result<(), AppError> {
    let config = Config::load()?;
    let api = ApiConfig::from_env()?;
    reporter.config_loaded();

    // Every request is awaited in turn; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run(&config, &api, reporter))?;
    Ok(())
}
