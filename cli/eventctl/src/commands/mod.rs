//! CLI commands.
//!
//! Every command is an area. Guarded areas declare an [`AccessRule`] that is
//! checked against the session before the command runs.

mod auth;
mod config;
mod home;
mod organizer;
mod participant;
mod profile;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_model::Role;
use eventdesk_session::{AccessGuard, AccessRule, Decision, Platform, Redirect, SessionStore};
use tracing::debug;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::CliError;
use crate::notice::Notice;
use crate::output::{print_notice, OutputFormat};

/// eventdesk CLI - organize events and manage enrollments.
#[derive(Debug, Parser)]
#[command(name = "evd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in, register, or reset a password.
    Auth(auth::AuthCommand),

    /// Show your dashboard.
    Home,

    /// Manage your events (organizers).
    Organizer(organizer::OrganizerCommand),

    /// Browse events and manage enrollments (participants).
    Participant(participant::ParticipantCommand),

    /// View or edit your profile.
    Profile(profile::ProfileCommand),

    /// Show or change CLI configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Commands {
    /// Access requirement of the area this command enters; `None` is public.
    fn access_rule(&self) -> Option<AccessRule> {
        match self {
            Commands::Auth(_) | Commands::Config(_) | Commands::Version => None,
            Commands::Home | Commands::Profile(_) => Some(AccessRule::AUTHENTICATED),
            Commands::Organizer(_) => Some(AccessRule::role(Role::Organizer)),
            Commands::Participant(_) => Some(AccessRule::role(Role::Regular)),
        }
    }
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self, config: Config) -> Result<()> {
        let format = OutputFormat::parse(&self.format);

        let platform = Platform::detect(config.session_dir.clone());
        debug!(?platform, "Detected platform");
        let session = SessionStore::new(&platform);
        let client = ApiClient::new(&config, session.clone())?;

        let ctx = CommandContext {
            config,
            guard: AccessGuard::new(session.clone()),
            session,
            client,
            format,
        };

        if let Some(rule) = self.command.access_rule() {
            match ctx.guard.check(&rule) {
                Decision::Allow => {}
                Decision::Redirect(Redirect::Login) => return Err(CliError::NotAuthenticated.into()),
                Decision::Redirect(redirect @ Redirect::Home(role)) => {
                    print_notice(&Notice::warning(
                        "Acesso restrito",
                        format!(
                            "Esta área não está disponível para o perfil {}. Redirecionando para {}.",
                            role,
                            redirect.path()
                        ),
                    ));
                    return home::render(&ctx, role).await;
                }
            }
        }

        match self.command {
            Commands::Auth(cmd) => cmd.run(ctx).await,
            Commands::Home => home::run(&ctx).await,
            Commands::Organizer(cmd) => cmd.run(ctx).await,
            Commands::Participant(cmd) => cmd.run(ctx).await,
            Commands::Profile(cmd) => cmd.run(ctx).await,
            Commands::Config(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("evd {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub session: SessionStore,
    pub client: ApiClient,
    pub guard: AccessGuard,
    pub format: OutputFormat,
}
