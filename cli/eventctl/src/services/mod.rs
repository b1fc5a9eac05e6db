//! Backend services. Each wraps the shared [`ApiClient`](crate::client::ApiClient).

pub mod auth;
pub mod events;
pub mod participation;
pub mod users;

pub use auth::AuthService;
pub use events::EventsService;
pub use participation::ParticipationService;
pub use users::UsersService;
