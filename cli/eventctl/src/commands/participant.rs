//! Participant commands: browse events and manage enrollments.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Args, Subcommand};
use eventdesk_model::{AvailableEvent, Enrollment};
use serde::Serialize;
use tabled::Tabled;

use crate::notice::Notice;
use crate::output::{print_info, print_notice, print_output, print_single, OutputFormat};
use crate::services::ParticipationService;

use super::organizer::display_date;
use super::CommandContext;

/// Participant commands.
#[derive(Debug, Args)]
pub struct ParticipantCommand {
    #[command(subcommand)]
    command: ParticipantSubcommand,
}

#[derive(Debug, Subcommand)]
enum ParticipantSubcommand {
    /// List events open for enrollment.
    Available,

    /// Show an event's public page.
    Show {
        id: i64,
    },

    /// Enroll in an event.
    Enroll {
        id: i64,
    },

    /// Cancel an enrollment.
    Cancel {
        id: i64,

        /// Confirm cancellation.
        #[arg(long)]
        yes: bool,
    },

    /// List your enrollments.
    Enrollments,
}

/// Available event row for table output.
#[derive(Debug, Serialize, Tabled)]
pub(super) struct AvailableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "TÍTULO")]
    title: String,
    #[tabled(rename = "TIPO")]
    kind: String,
    #[tabled(rename = "DATA")]
    date: String,
    #[tabled(rename = "HORA")]
    time: String,
    #[tabled(rename = "LOCAL")]
    location: String,
    #[tabled(rename = "VAGAS")]
    availability: String,
    #[tabled(rename = "SITUAÇÃO")]
    status: String,
}

impl From<&AvailableEvent> for AvailableRow {
    fn from(event: &AvailableEvent) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            kind: event.event_type.label().to_string(),
            date: display_date(&event.date),
            time: event.time.clone(),
            location: event.location.clone(),
            availability: event.slots_left(),
            status: event_status(event).to_string(),
        }
    }
}

/// Enrollment row for table output.
#[derive(Debug, Serialize, Tabled)]
pub(super) struct EnrollmentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "TÍTULO")]
    title: String,
    #[tabled(rename = "TIPO")]
    kind: String,
    #[tabled(rename = "DATA")]
    date: String,
    #[tabled(rename = "HORA")]
    time: String,
    #[tabled(rename = "LOCAL")]
    location: String,
    #[tabled(rename = "SITUAÇÃO")]
    status: String,
}

impl EnrollmentRow {
    fn new(enrollment: &Enrollment, now: NaiveDateTime) -> Self {
        Self {
            id: enrollment.id,
            title: enrollment.title.clone(),
            kind: enrollment.event_type.label().to_string(),
            date: display_date(&enrollment.date),
            time: enrollment.time.clone(),
            location: enrollment.location.clone(),
            status: if enrollment.is_past(now) {
                "Encerrado".to_string()
            } else {
                "Próximo".to_string()
            },
        }
    }
}

fn event_status(event: &AvailableEvent) -> &'static str {
    if event.is_enrolled {
        "Inscrito"
    } else if event.is_past {
        "Encerrado"
    } else if event.is_full {
        "Lotado"
    } else {
        "Aberto"
    }
}

/// Print events open for enrollment.
pub(super) fn print_available(events: &[AvailableEvent], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(&events),
        OutputFormat::Table => {
            let rows: Vec<AvailableRow> = events.iter().map(AvailableRow::from).collect();
            print_output(&rows, format);
        }
    }
}

/// Print the participant's enrollments, upcoming ones first.
pub(super) fn print_enrollments(enrollments: &[Enrollment], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(&enrollments),
        OutputFormat::Table => {
            let now = Local::now().naive_local();
            let mut rows: Vec<(bool, EnrollmentRow)> = enrollments
                .iter()
                .map(|e| (e.is_past(now), EnrollmentRow::new(e, now)))
                .collect();
            rows.sort_by_key(|(past, _)| *past);
            let rows: Vec<EnrollmentRow> = rows.into_iter().map(|(_, row)| row).collect();
            print_output(&rows, format);
        }
    }
}

impl ParticipantCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let service = ParticipationService::new(ctx.client.clone());
        match self.command {
            ParticipantSubcommand::Available => {
                print_available(&service.available().await?, ctx.format);
                Ok(())
            }
            ParticipantSubcommand::Show { id } => show(&service, id, ctx.format).await,
            ParticipantSubcommand::Enroll { id } => enroll(&service, id).await,
            ParticipantSubcommand::Cancel { id, yes } => cancel(&service, id, yes).await,
            ParticipantSubcommand::Enrollments => {
                print_enrollments(&service.my_enrollments().await?, ctx.format);
                Ok(())
            }
        }
    }
}

async fn show(service: &ParticipationService, id: i64, format: OutputFormat) -> Result<()> {
    let event = service.public_detail(id).await?;
    match format {
        OutputFormat::Json => print_single(&event),
        OutputFormat::Table => {
            println!("{}", event.title);
            println!("  Tipo: {}", event.event_type);
            println!("  Data: {} às {}", display_date(&event.date), event.time);
            println!("  Local: {}", event.location);
            if !event.speaker.is_empty() {
                println!("  Palestrante: {}", event.speaker);
            }
            if !event.institution_organizer.is_empty() {
                println!("  Instituição: {}", event.institution_organizer);
            }
            println!("  Vagas: {}", event.availability());
            if !event.is_unlimited() {
                println!("  Ocupação: {:.0}%", event.occupancy_percent());
            }
            println!("  Situação: {}", event_status(&event));
            if !event.description.is_empty() {
                println!("\n{}", event.description);
            }
        }
    }
    Ok(())
}

/// Refusal shown instead of calling the backend, if any.
fn enrollment_refusal(event: &AvailableEvent) -> Option<Notice> {
    if event.is_enrolled {
        Some(Notice::info(
            "Inscrição existente",
            format!("Você já está inscrito em \"{}\".", event.title),
        ))
    } else if event.is_past {
        Some(Notice::warning(
            "Evento encerrado",
            "Não é possível se inscrever em um evento que já aconteceu.",
        ))
    } else if event.is_full {
        Some(Notice::warning("Evento lotado", "Não há vagas disponíveis."))
    } else {
        None
    }
}

async fn enroll(service: &ParticipationService, id: i64) -> Result<()> {
    let event = service.public_detail(id).await?;
    if let Some(notice) = enrollment_refusal(&event) {
        print_notice(&notice);
        return Ok(());
    }

    let receipt = service.enroll(id).await?;
    let message = if receipt.message.is_empty() {
        format!("Inscrição em \"{}\" confirmada.", event.title)
    } else {
        receipt.message
    };
    print_notice(&Notice::success("Inscrição realizada", message));
    Ok(())
}

async fn cancel(service: &ParticipationService, id: i64, yes: bool) -> Result<()> {
    if !yes {
        print_info(&format!(
            "Rode `evd participant cancel {id} --yes` para confirmar o cancelamento."
        ));
        return Ok(());
    }

    service.cancel(id).await?;
    print_notice(&Notice::success(
        "Inscrição cancelada",
        format!("Sua inscrição no evento {id} foi cancelada."),
    ));
    Ok(())
}
