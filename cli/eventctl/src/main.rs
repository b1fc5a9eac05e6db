//! eventctl (evd) - CLI for the eventdesk event-management API
//!
//! Organizers manage their events; participants browse events and enroll.
//! The session survives between invocations in a `0600` JSON file.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod client;
mod commands;
mod config;
mod error;
mod interceptor;
mod notice;
mod output;
mod services;
mod transport;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("Falha ao carregar a configuração")?;

    // Prefer EVD_LOG, fall back to the configured level.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("EVD_LOG").unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli.run(config).await
}
