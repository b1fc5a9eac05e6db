//! User-facing notices and backend error presentation.
//!
//! The backend reports failures as
//! `{"error": "...", "details": [{"field": "message"}, ...]}` or as a plain
//! `{"message": "..."}`. This module turns either shape into a titled
//! [`Notice`] with Portuguese field names.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

const GENERIC_PROCESSING_ERROR: &str = "Erro ao processar solicitação";
const UNKNOWN_ERROR: &str = "Erro desconhecido. Tente novamente.";
const SERVER_ERROR: &str = "Ocorreu um erro no servidor. Tente novamente mais tarde.";
const FORBIDDEN_DEFAULT: &str = "Você não tem permissão para realizar esta ação";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }
}

/// Error body sent by the backend. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<BTreeMap<String, Value>>>,
}

impl BackendError {
    /// Decode an error body, falling back to an empty error for anything unparseable.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn detail_entries(&self) -> impl Iterator<Item = (&str, String)> {
        self.details
            .iter()
            .flatten()
            .flat_map(|detail| detail.iter())
            .map(|(field, value)| (field.as_str(), detail_text(value)))
    }

    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Portuguese label of a backend field name.
pub fn field_label(field: &str) -> String {
    let label = match field {
        "email" => "E-mail",
        "password" => "Senha",
        "name" => "Nome",
        "telephone_number" => "Telefone",
        "department" => "Departamento",
        "type" => "Tipo de usuário",
        "current_password" => "Senha atual",
        "new_password" => "Nova senha",
        "confirm_password" | "confirmPassword" => "Confirmação de senha",
        _ => {
            let mut chars = field.chars();
            return match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
        }
    };
    label.to_string()
}

/// Best message for an error body; `fallback` is used when the body has none.
pub fn extract_error_message(body: &BackendError, fallback: Option<&str>) -> String {
    if body.has_details() {
        let lines: Vec<String> = body
            .detail_entries()
            .map(|(field, message)| format!("{}: {}", field_label(field), message))
            .collect();
        if lines.is_empty() {
            return GENERIC_PROCESSING_ERROR.to_string();
        }
        return lines.join("\n");
    }

    body.message
        .as_deref()
        .or(fallback)
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}

/// Per-field messages, keyed by backend field name.
pub fn extract_field_errors(body: &BackendError) -> BTreeMap<String, String> {
    body.detail_entries()
        .map(|(field, message)| (field.to_string(), message))
        .collect()
}

/// Whether the backend rejected `field` as a duplicate.
pub fn is_duplicate_field_error(body: &BackendError, field: &str) -> bool {
    body.detail_entries()
        .filter(|(name, _)| *name == field)
        .any(|(_, message)| is_duplicate_text(&message))
}

fn is_duplicate_text(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("duplicado") || lower.contains("já existe") || lower.contains("already exists")
}

/// Classify a failed response into a titled notice.
pub fn format_error_notice(status: Option<u16>, body: &BackendError, fallback: Option<&str>) -> Notice {
    let message = extract_error_message(body, fallback);

    if body.has_details() {
        return Notice::error("Erro de validação", message);
    }

    let lower = message.to_lowercase();
    if lower.contains("duplicado") || lower.contains("já existe") {
        return Notice::error("Dados duplicados", message);
    }

    match status {
        Some(401) | Some(403) => {
            let message = if message.is_empty() {
                FORBIDDEN_DEFAULT.to_string()
            } else {
                message
            };
            Notice::error("Erro de autenticação", message)
        }
        Some(status) if status >= 500 => Notice::error("Erro no servidor", SERVER_ERROR),
        _ => Notice::error("Erro", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> BackendError {
        BackendError::from_body(json.as_bytes())
    }

    #[test]
    fn details_become_labelled_lines() {
        let error = body(
            r#"{"error": "Validation error", "details": [
                {"email": "formato inválido"},
                {"telephone_number": "obrigatório", "speaker": "muito longo"}
            ]}"#,
        );
        assert_eq!(
            extract_error_message(&error, None),
            "E-mail: formato inválido\nSpeaker: muito longo\nTelefone: obrigatório"
        );
    }

    #[test]
    fn empty_details_use_generic_message() {
        let error = body(r#"{"error": "Validation error", "details": []}"#);
        assert_eq!(extract_error_message(&error, None), GENERIC_PROCESSING_ERROR);
    }

    #[test]
    fn message_then_fallback_then_unknown() {
        assert_eq!(
            extract_error_message(&body(r#"{"message": "Evento não encontrado"}"#), Some("x")),
            "Evento não encontrado"
        );
        assert_eq!(extract_error_message(&body("<html>"), Some("timeout")), "timeout");
        assert_eq!(extract_error_message(&body("{}"), None), UNKNOWN_ERROR);
    }

    #[test]
    fn field_errors_and_duplicates() {
        let error = body(r#"{"details": [{"email": "E-mail já existe"}]}"#);
        let fields = extract_field_errors(&error);
        assert_eq!(fields.get("email").map(String::as_str), Some("E-mail já existe"));
        assert!(is_duplicate_field_error(&error, "email"));
        assert!(!is_duplicate_field_error(&error, "name"));
    }

    #[test]
    fn field_labels() {
        assert_eq!(field_label("new_password"), "Nova senha");
        assert_eq!(field_label("confirmPassword"), "Confirmação de senha");
        assert_eq!(field_label("location"), "Location");
        assert_eq!(field_label(""), "");
    }

    #[test]
    fn notice_classification() {
        let validation = format_error_notice(Some(422), &body(r#"{"details": [{"name": "curto"}]}"#), None);
        assert_eq!(validation.title, "Erro de validação");
        assert_eq!(validation.message, "Nome: curto");

        let duplicate = format_error_notice(Some(409), &body(r#"{"message": "Registro duplicado"}"#), None);
        assert_eq!(duplicate.title, "Dados duplicados");

        let auth = format_error_notice(Some(401), &body(r#"{"message": "Credenciais inválidas"}"#), None);
        assert_eq!(auth.title, "Erro de autenticação");
        assert_eq!(auth.message, "Credenciais inválidas");

        let server = format_error_notice(Some(503), &body(r#"{"message": "db down"}"#), None);
        assert_eq!(server.title, "Erro no servidor");
        assert_eq!(server.message, SERVER_ERROR);

        let other = format_error_notice(Some(400), &body(r#"{"message": "Data inválida"}"#), None);
        assert_eq!(other, Notice::error("Erro", "Data inválida"));
    }
}
