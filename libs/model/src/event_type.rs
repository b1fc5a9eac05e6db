//! Event-type vocabulary shared between the UI labels and the backend codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Kind of event, serialized as the backend code.
///
/// Codes this client does not know decode into [`EventType::Unknown`] and
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Workshop,
    Lecture,
    Conference,
    Seminar,
    Hackathon,
    Meetup,
    Training,
    Webinar,
    Other,
    Unknown(String),
}

impl EventType {
    pub const ALL: [EventType; 9] = [
        EventType::Workshop,
        EventType::Lecture,
        EventType::Conference,
        EventType::Seminar,
        EventType::Hackathon,
        EventType::Meetup,
        EventType::Training,
        EventType::Webinar,
        EventType::Other,
    ];

    /// Backend code, e.g. `LECTURE`.
    pub fn code(&self) -> &str {
        match self {
            EventType::Workshop => "WORKSHOP",
            EventType::Lecture => "LECTURE",
            EventType::Conference => "CONFERENCE",
            EventType::Seminar => "SEMINAR",
            EventType::Hackathon => "HACKATHON",
            EventType::Meetup => "MEETUP",
            EventType::Training => "TRAINING",
            EventType::Webinar => "WEBINAR",
            EventType::Other => "OTHER",
            EventType::Unknown(code) => code,
        }
    }

    /// Display label, e.g. `Palestra`. Unknown codes are their own label.
    pub fn label(&self) -> &str {
        match self {
            EventType::Workshop => "Workshop",
            EventType::Lecture => "Palestra",
            EventType::Conference => "Conferência",
            EventType::Seminar => "Seminário",
            EventType::Hackathon => "Hackathon",
            EventType::Meetup => "Meetup",
            EventType::Training => "Treinamento",
            EventType::Webinar => "Webinar",
            EventType::Other => "Outro",
            EventType::Unknown(code) => code,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code).unwrap_or(Self::Unknown(code)))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either vocabulary, case-insensitively.
impl FromStr for EventType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                t.code().eq_ignore_ascii_case(trimmed) || t.label().to_lowercase() == trimmed.to_lowercase()
            })
            .ok_or_else(|| ModelError::UnknownEventType(s.to_string()))
    }
}

/// Translate a display label to its backend code.
///
/// Unknown input is returned unchanged so already-translated values pass through.
pub fn to_backend(label: &str) -> String {
    EventType::from_label(label)
        .map(|t| t.code().to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Translate a backend code to its display label, returning unknown input unchanged.
pub fn from_backend(code: &str) -> String {
    EventType::from_code(code)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Workshop", "WORKSHOP")]
    #[case("Palestra", "LECTURE")]
    #[case("Conferência", "CONFERENCE")]
    #[case("Seminário", "SEMINAR")]
    #[case("Treinamento", "TRAINING")]
    #[case("Outro", "OTHER")]
    fn translates_both_directions(#[case] label: &str, #[case] code: &str) {
        assert_eq!(to_backend(label), code);
        assert_eq!(from_backend(code), label);
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(to_backend("Festa"), "Festa");
        assert_eq!(from_backend("PARTY"), "PARTY");
        // Already a backend code.
        assert_eq!(to_backend("LECTURE"), "LECTURE");
    }

    #[test]
    fn every_variant_round_trips_through_labels() {
        for t in EventType::ALL {
            assert_eq!(EventType::from_label(t.label()), Some(t.clone()));
            assert_eq!(EventType::from_code(t.code()), Some(t));
        }
    }

    #[test]
    fn parses_either_vocabulary() {
        assert_eq!("palestra".parse::<EventType>().unwrap(), EventType::Lecture);
        assert_eq!("lecture".parse::<EventType>().unwrap(), EventType::Lecture);
        assert_eq!("SEMINÁRIO".parse::<EventType>().unwrap(), EventType::Seminar);
        assert!("party".parse::<EventType>().is_err());
    }

    #[test]
    fn serializes_as_backend_code() {
        let json = serde_json::to_string(&EventType::Conference).unwrap();
        assert_eq!(json, "\"CONFERENCE\"");
        let parsed: EventType = serde_json::from_str("\"WEBINAR\"").unwrap();
        assert_eq!(parsed, EventType::Webinar);
    }

    #[test]
    fn unknown_codes_survive_a_round_trip() {
        let parsed: EventType = serde_json::from_str("\"BOOTCAMP\"").unwrap();
        assert_eq!(parsed, EventType::Unknown("BOOTCAMP".to_string()));
        assert_eq!(parsed.label(), "BOOTCAMP");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"BOOTCAMP\"");
        assert!("BOOTCAMP".parse::<EventType>().is_err());
    }
}
