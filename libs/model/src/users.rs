//! User, role and authentication payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;

/// User type. Determines which guarded areas an identity may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Organizer,
    Regular,
}

impl Role {
    pub fn code(self) -> &'static str {
        match self {
            Role::Organizer => "ORGANIZER",
            Role::Regular => "REGULAR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Organizer => "Organizador",
            Role::Regular => "Regular",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Role::Organizer, Role::Regular]
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s) || r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownRole(s.to_string()))
    }
}

/// Profile snapshot of the authenticated user.
///
/// Field names follow the backend (`telephone_number`, `type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "telephone_number")]
    pub phone: String,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// The backend sends user ids as numbers; older endpoints send strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

/// Registration payload (`POST users/`).
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub telephone_number: String,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Partial profile update (`PUT users/`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.telephone_number.is_none()
            && self.role.is_none()
            && self.department.is_none()
    }
}

/// Password change (`PATCH users/`).
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub user: Identity,
}

/// Plain `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_numeric_id() {
        let json = r#"{"id": 7, "name": "Ana", "email": "ana@example.com",
            "telephone_number": "(11) 98765-4321", "type": "REGULAR"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, "7");
        assert_eq!(identity.role, Role::Regular);
        assert_eq!(identity.department, None);
    }

    #[test]
    fn identity_serializes_with_backend_names() {
        let identity = Identity {
            id: "3".to_string(),
            name: "Bruno".to_string(),
            email: "bruno@example.com".to_string(),
            phone: "11987654321".to_string(),
            role: Role::Organizer,
            department: Some("TI".to_string()),
        };
        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["type"], "ORGANIZER");
        assert_eq!(value["telephone_number"], "11987654321");
        assert_eq!(value["department"], "TI");
    }

    #[test]
    fn role_parses_codes_and_labels() {
        assert_eq!("ORGANIZER".parse::<Role>().unwrap(), Role::Organizer);
        assert_eq!("organizador".parse::<Role>().unwrap(), Role::Organizer);
        assert_eq!("regular".parse::<Role>().unwrap(), Role::Regular);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn update_user_skips_unset_fields() {
        let update = UpdateUser {
            name: Some("Carla".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Carla" }));
        assert!(UpdateUser::default().is_empty());
    }
}
