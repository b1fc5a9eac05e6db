//! # eventdesk-model
//!
//! Wire types for the eventdesk backend.
//!
//! ## Vocabulary
//!
//! The backend speaks English upper-case codes (`ORGANIZER`, `WORKSHOP`, ...)
//! while users see Portuguese labels (`Organizador`, `Palestra`, ...). Every
//! enum here serializes to the backend code and exposes its display label, so
//! translation happens in exactly one place.
//!
//! ## Contents
//!
//! - Users: [`Role`], [`Identity`], [`NewUser`], [`UpdateUser`], [`UpdatePassword`]
//! - Authentication: [`LoginRequest`], [`LoginResponse`], [`MessageResponse`]
//! - Events: [`EventType`], [`Event`], [`EventInput`], [`AvailableEvent`],
//!   [`PublicEventDetail`], [`Enrollment`]
//! - Telephone formatting: [`format_phone`], [`is_valid_phone`]

mod error;
mod event_type;
mod events;
mod phone;
mod users;

pub use error::ModelError;
pub use event_type::*;
pub use events::*;
pub use phone::*;
pub use users::*;
