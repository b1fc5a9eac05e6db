//! Organizer commands: manage the events you created.

use anyhow::Result;
use clap::{Args, Subcommand};
use eventdesk_model::{event_date, event_time, Event, EventInput, EventType};
use serde::Serialize;
use tabled::Tabled;

use crate::notice::Notice;
use crate::output::{print_info, print_notice, print_output, print_single, OutputFormat};
use crate::services::EventsService;

use super::CommandContext;

/// Organizer commands.
#[derive(Debug, Args)]
pub struct OrganizerCommand {
    #[command(subcommand)]
    command: OrganizerSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrganizerSubcommand {
    /// List your events.
    List,

    /// Show one event.
    Show {
        id: i64,
    },

    /// Create an event.
    Create(CreateEventArgs),

    /// Edit an event. Omitted flags keep their current value.
    Update(UpdateEventArgs),

    /// Delete an event.
    Delete {
        id: i64,

        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct CreateEventArgs {
    #[arg(long)]
    title: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Date as YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Start time as HH:MM.
    #[arg(long)]
    time: String,

    #[arg(long)]
    location: String,

    /// Maximum participants. Omit or 0 for unlimited.
    #[arg(long)]
    capacity: Option<u32>,

    /// Event type, by label ("Palestra") or code (LECTURE).
    #[arg(long = "type")]
    event_type: EventType,

    #[arg(long, default_value = "")]
    speaker: String,

    /// Organizing institution.
    #[arg(long)]
    institution: String,
}

#[derive(Debug, Default, Args)]
struct UpdateEventArgs {
    id: i64,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    time: Option<String>,

    #[arg(long)]
    location: Option<String>,

    /// 0 makes the event unlimited.
    #[arg(long)]
    capacity: Option<u32>,

    #[arg(long = "type")]
    event_type: Option<EventType>,

    #[arg(long)]
    speaker: Option<String>,

    #[arg(long)]
    institution: Option<String>,
}

/// Event row for table output.
#[derive(Debug, Serialize, Tabled)]
pub(super) struct EventRow {
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
    capacity: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            kind: event.event_type.label().to_string(),
            date: display_date(&event.date),
            time: event.time.clone(),
            location: event.location.clone(),
            capacity: match event.capacity {
                None | Some(0) => "Ilimitado".to_string(),
                Some(n) => n.to_string(),
            },
        }
    }
}

/// Trim the midnight suffix from wire dates.
pub(super) fn display_date(date: &str) -> String {
    date.split('T').next().unwrap_or(date).to_string()
}

/// Print the organizer's events.
pub(super) fn print_events(events: &[Event], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(&events),
        OutputFormat::Table => {
            let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
            print_output(&rows, format);
        }
    }
}

impl OrganizerCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let events = EventsService::new(ctx.client.clone());
        match self.command {
            OrganizerSubcommand::List => list(&events, ctx.format).await,
            OrganizerSubcommand::Show { id } => show(&events, id, ctx.format).await,
            OrganizerSubcommand::Create(args) => create(&events, args).await,
            OrganizerSubcommand::Update(args) => update(&events, args).await,
            OrganizerSubcommand::Delete { id, yes } => delete(&events, id, yes).await,
        }
    }
}

async fn list(events: &EventsService, format: OutputFormat) -> Result<()> {
    let mine = events.list().await?;
    print_events(&mine, format);
    Ok(())
}

async fn show(events: &EventsService, id: i64, format: OutputFormat) -> Result<()> {
    let event = events.get(id).await?;
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
            println!("  Instituição: {}", event.institution_organizer);
            println!("  Vagas: {}", EventRow::from(&event).capacity);
            if !event.description.is_empty() {
                println!("\n{}", event.description);
            }
        }
    }
    Ok(())
}

async fn create(events: &EventsService, args: CreateEventArgs) -> Result<()> {
    let input = EventInput {
        title: args.title,
        description: args.description,
        date: event_date(&args.date)?,
        time: event_time(&args.time)?,
        location: args.location,
        capacity: args.capacity.filter(|&n| n > 0),
        event_type: args.event_type,
        speaker: args.speaker,
        institution_organizer: args.institution,
    };

    let receipt = events.create(&input).await?;
    print_notice(&Notice::success(
        "Evento criado",
        format!("\"{}\" criado com ID {}.", input.title, receipt.id),
    ));
    Ok(())
}

async fn update(events: &EventsService, args: UpdateEventArgs) -> Result<()> {
    let current = events.get(args.id).await?;
    let input = apply_update(EventInput::from(current), &args)?;

    events.update(args.id, &input).await?;
    print_notice(&Notice::success(
        "Evento atualizado",
        format!("\"{}\" foi atualizado.", input.title),
    ));
    Ok(())
}

async fn delete(events: &EventsService, id: i64, yes: bool) -> Result<()> {
    if !yes {
        print_info(&format!(
            "Esta ação não pode ser desfeita. Rode `evd organizer delete {id} --yes` para confirmar."
        ));
        return Ok(());
    }

    events.delete(id).await?;
    print_notice(&Notice::success("Evento excluído", format!("Evento {id} excluído.")));
    Ok(())
}

fn apply_update(mut input: EventInput, edits: &UpdateEventArgs) -> Result<EventInput> {
    if let Some(title) = &edits.title {
        input.title = title.clone();
    }
    if let Some(description) = &edits.description {
        input.description = description.clone();
    }
    if let Some(date) = &edits.date {
        input.date = event_date(date)?;
    }
    if let Some(time) = &edits.time {
        input.time = event_time(time)?;
    }
    if let Some(location) = &edits.location {
        input.location = location.clone();
    }
    if let Some(capacity) = edits.capacity {
        input.capacity = (capacity > 0).then_some(capacity);
    }
    if let Some(event_type) = &edits.event_type {
        input.event_type = event_type.clone();
    }
    if let Some(speaker) = &edits.speaker {
        input.speaker = speaker.clone();
    }
    if let Some(institution) = &edits.institution {
        input.institution_organizer = institution.clone();
    }
    Ok(input)
}
