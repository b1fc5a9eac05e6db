//! Error types for model parsing.

use thiserror::Error;

/// Errors that can occur when parsing model values from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The role is neither a backend code nor a display label.
    #[error("perfil desconhecido: {0}")]
    UnknownRole(String),

    /// The event type is neither a backend code nor a display label.
    #[error("tipo de evento desconhecido: {0}")]
    UnknownEventType(String),

    /// A date did not match `YYYY-MM-DD`.
    #[error("data inválida '{0}', use AAAA-MM-DD")]
    InvalidDate(String),

    /// A time did not match `HH:MM`.
    #[error("horário inválido '{0}', use HH:MM")]
    InvalidTime(String),
}
