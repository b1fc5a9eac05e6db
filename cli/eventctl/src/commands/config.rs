//! Configuration commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Show or change CLI configuration.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration.
    Show,

    /// Change the backend base address.
    SetApiUrl {
        /// Absolute base address, e.g. https://api.example.com/
        url: String,
    },
}

#[derive(Debug, Serialize)]
struct ConfigView {
    api_url: String,
    session_dir: Option<String>,
    request_timeout_secs: u64,
    log_level: String,
    authenticated: bool,
}

impl ConfigCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::SetApiUrl { url } => set_api_url(ctx, url),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        api_url: ctx.client.base_url().get(),
        session_dir: ctx
            .config
            .session_dir
            .as_ref()
            .map(|dir| dir.display().to_string()),
        request_timeout_secs: ctx.config.request_timeout_secs,
        log_level: ctx.config.log_level.clone(),
        authenticated: ctx.session.is_authenticated(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("api_url: {}", view.api_url);
            println!(
                "session_dir: {}",
                view.session_dir.as_deref().unwrap_or("(diretório de configuração)")
            );
            println!("request_timeout_secs: {}", view.request_timeout_secs);
            println!("log_level: {}", view.log_level);
            println!("authenticated: {}", if view.authenticated { "sim" } else { "não" });
        }
    }

    Ok(())
}

fn set_api_url(mut ctx: CommandContext, url: String) -> Result<()> {
    if !crate::interceptor::is_absolute(&url) {
        bail!("O endereço da API deve começar com http:// ou https://");
    }

    ctx.client.base_url().set(&url);
    ctx.config.api_url = url;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "api_url": ctx.config.api_url })),
        OutputFormat::Table => print_success(&format!("Endereço da API alterado para {}", ctx.config.api_url)),
    }

    Ok(())
}
