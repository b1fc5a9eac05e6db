//! Role dashboards.

use anyhow::Result;
use colored::Colorize;
use eventdesk_model::Role;
use eventdesk_session::policy::home_path;

use crate::error::CliError;
use crate::output::OutputFormat;
use crate::services::{EventsService, ParticipationService};

use super::organizer::print_events;
use super::participant::{print_available, print_enrollments};
use super::CommandContext;

/// Render the dashboard of the logged-in user.
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let identity = ctx.session.identity().ok_or(CliError::NotAuthenticated)?;
    if ctx.format == OutputFormat::Table {
        println!("Olá, {}!", identity.name.bold());
    }
    render(ctx, identity.role).await
}

/// Render the dashboard of `role`.
pub async fn render(ctx: &CommandContext, role: Role) -> Result<()> {
    let table = ctx.format == OutputFormat::Table;
    if table {
        println!("{}", format!("{} ({})", home_path(role), role).dimmed());
    }

    match role {
        Role::Organizer => {
            let events = EventsService::new(ctx.client.clone()).list().await?;
            if table {
                println!("\n{}", "Meus eventos".bold());
            }
            print_events(&events, ctx.format);
        }
        Role::Regular => {
            let service = ParticipationService::new(ctx.client.clone());
            let available = service.available().await?;
            let enrollments = service.my_enrollments().await?;
            if table {
                println!("\n{}", "Eventos disponíveis".bold());
            }
            print_available(&available, ctx.format);
            if table {
                println!("\n{}", "Minhas inscrições".bold());
            }
            print_enrollments(&enrollments, ctx.format);
        }
    }
    Ok(())
}
