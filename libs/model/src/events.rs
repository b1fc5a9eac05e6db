//! Event and enrollment payloads.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::event_type::EventType;

/// Wire format of event dates: midnight ISO timestamps.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire format of event start times.
const TIME_FORMAT: &str = "%H:%M";

/// Event as returned to its organizer (`GET events/`, `GET events/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    /// `None` or `Some(0)` means unlimited.
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub institution_organizer: String,
    pub created_by: i64,
}

impl Event {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        starts_at(&self.date, &self.time)
    }
}

/// Body of `POST events/` and `PUT events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub speaker: String,
    pub institution_organizer: String,
}

impl From<Event> for EventInput {
    fn from(event: Event) -> Self {
        Self {
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            location: event.location,
            capacity: event.capacity,
            event_type: event.event_type,
            speaker: event.speaker,
            institution_organizer: event.institution_organizer,
        }
    }
}

/// Acknowledgement of a create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReceipt {
    pub id: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

/// Event as seen by participants (`GET events/available`, `GET events/{id}/public`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub remaining_slots: u32,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub institution_organizer: String,
    #[serde(default)]
    pub is_full: bool,
    #[serde(default)]
    pub is_past: bool,
    #[serde(default)]
    pub is_enrolled: bool,
}

pub type PublicEventDetail = AvailableEvent;

impl AvailableEvent {
    pub fn is_unlimited(&self) -> bool {
        matches!(self.capacity, None | Some(0))
    }

    /// Human-readable slot summary.
    pub fn availability(&self) -> String {
        match self.capacity {
            None | Some(0) => "Vagas ilimitadas".to_string(),
            Some(capacity) => format!(
                "{} de {} vagas disponíveis",
                self.remaining_slots, capacity
            ),
        }
    }

    /// Short slot summary for listings.
    pub fn slots_left(&self) -> String {
        if self.is_unlimited() {
            "Vagas ilimitadas".to_string()
        } else {
            format!("{} vagas disponíveis", self.remaining_slots)
        }
    }

    pub fn can_enroll(&self) -> bool {
        !self.is_past && !self.is_full
    }

    /// Share of capacity already taken, 0 for unlimited events.
    pub fn occupancy_percent(&self) -> f64 {
        match self.capacity {
            None | Some(0) => 0.0,
            Some(capacity) => {
                let taken = capacity.saturating_sub(self.remaining_slots);
                f64::from(taken) / f64::from(capacity) * 100.0
            }
        }
    }

    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        starts_at(&self.date, &self.time)
    }
}

/// Enrollment of the current participant (`GET events/my-enrollments`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub enrolled_at: Option<String>,
}

impl Enrollment {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        starts_at(&self.date, &self.time)
    }

    /// True when the event starts before `now`; unparseable dates count as upcoming.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.starts_at().is_some_and(|start| start < now)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub event_id: Option<i64>,
}

/// Parse a user-entered `YYYY-MM-DD` date into the wire format.
pub fn event_date(input: &str) -> Result<String, ModelError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ModelError::InvalidDate(input.to_string()))?;
    Ok(date.and_time(NaiveTime::MIN).format(DATE_FORMAT).to_string())
}

/// Validate a user-entered `HH:MM` time.
pub fn event_time(input: &str) -> Result<String, ModelError> {
    let time = NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|_| ModelError::InvalidTime(input.to_string()))?;
    Ok(time.format(TIME_FORMAT).to_string())
}

fn starts_at(date: &str, time: &str) -> Option<NaiveDateTime> {
    let day = NaiveDateTime::parse_from_str(date, DATE_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .ok()?;
    let at = NaiveTime::parse_from_str(time, TIME_FORMAT).unwrap_or(NaiveTime::MIN);
    Some(day.and_time(at))
}
