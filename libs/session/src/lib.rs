//! # eventdesk-session
//!
//! Client-side session handling for eventdesk.
//!
//! - [`Platform`]: one-time capability check deciding whether session
//!   storage exists in this execution context
//! - [`SessionStore`]: token + identity snapshot with a narrow
//!   get/set/clear contract that never raises
//! - [`policy`]: allow / redirect decisions for guarded areas
//!
//! Nothing outside this crate reads or writes session storage directly.

mod error;
mod platform;
pub mod policy;
mod storage;
mod store;

pub use error::StorageError;
pub use platform::{Platform, SESSION_FILE};
pub use policy::{AccessGuard, AccessRule, Decision, Redirect};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{Session, SessionStore, TOKEN_KEY, USER_KEY};
