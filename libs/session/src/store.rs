//! The session store: token plus identity snapshot.
//!
//! This is the only component that touches session storage. Reads never
//! fail: a missing, unreadable or corrupt entry is reported as "no session".
//! Writes never fail either; storage errors are logged and the store falls
//! back to a state where token and identity are both absent.

use std::fmt;
use std::sync::Arc;

use eventdesk_model::Identity;
use tracing::{debug, info, warn};

use crate::platform::Platform;
use crate::storage::SessionStorage;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key of the JSON-encoded identity.
pub const USER_KEY: &str = "auth_user";

/// A token paired with the identity it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Shared handle to the current session. Cloning is cheap.
#[derive(Clone)]
pub struct SessionStore {
    storage: Option<Arc<dyn SessionStorage>>,
}

impl SessionStore {
    /// Build a store for the given platform. The capability is checked here
    /// and nowhere else.
    pub fn new(platform: &Platform) -> Self {
        Self {
            storage: platform.storage().cloned(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(&Platform::in_memory())
    }

    /// Store a token and its identity together.
    pub fn set_session(&self, token: &str, identity: &Identity) {
        let Some(storage) = &self.storage else {
            return;
        };

        let user_json = match serde_json::to_string(identity) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode identity; session not stored");
                return;
            }
        };

        match storage.set_items(&[(USER_KEY, user_json.as_str()), (TOKEN_KEY, token)]) {
            Ok(()) => info!(user_id = %identity.id, role = identity.role.code(), "Session started"),
            Err(e) => {
                warn!(error = %e, "Failed to store session; clearing partial state");
                self.remove_all(storage.as_ref());
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// The identity snapshot, present only alongside a token.
    pub fn identity(&self) -> Option<Identity> {
        self.token()?;
        let storage = self.storage.as_ref()?;

        let raw = match storage.get_item(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read session identity");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Stored identity is corrupt; treating session as anonymous");
                None
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        let token = self.token()?;
        let identity = self.identity()?;
        Some(Session { token, identity })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the identity snapshot after a profile reload.
    ///
    /// Does nothing without a token, so an identity never outlives its token.
    pub fn replace_identity(&self, identity: &Identity) {
        let Some(storage) = &self.storage else {
            return;
        };
        if self.token().is_none() {
            debug!("No active session; identity refresh ignored");
            return;
        }

        let user_json = match serde_json::to_string(identity) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode identity; keeping previous snapshot");
                return;
            }
        };

        if let Err(e) = storage.set_item(USER_KEY, &user_json) {
            warn!(error = %e, "Failed to refresh stored identity");
        }
    }

    /// Remove token and identity. Calling it again is a no-op.
    pub fn clear_session(&self) {
        if let Some(storage) = &self.storage {
            self.remove_all(storage.as_ref());
            info!("Session cleared");
        }
    }

    fn remove_all(&self, storage: &dyn SessionStorage) {
        if let Err(e) = storage.remove_items(&[TOKEN_KEY, USER_KEY]) {
            warn!(error = %e, "Failed to clear session storage");
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use eventdesk_model::Role;
    use proptest::prelude::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: "42".to_string(),
            name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 91234-5678".to_string(),
            role,
            department: None,
        }
    }

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::new(&Platform::with_storage(storage))
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = SessionStore::in_memory();
        assert_eq!(store.token(), None);
        assert_eq!(store.identity(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_then_clear() {
        let store = SessionStore::in_memory();
        store.set_session("tok", &identity(Role::Organizer));

        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.identity(), Some(identity(Role::Organizer)));

        store.clear_session();
        assert_eq!(store.token(), None);
        assert_eq!(store.identity(), None);
    }

    #[test]
    fn clear_twice_is_same_as_once() {
        let store = SessionStore::in_memory();
        store.set_session("tok", &identity(Role::Regular));
        store.clear_session();
        store.clear_session();
        assert_eq!(store.session(), None);
    }

    #[test]
    fn corrupt_identity_reads_as_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_KEY, "tok").unwrap();
        storage.set_item(USER_KEY, "{not valid json").unwrap();

        let store = store_with(storage);
        assert_eq!(store.identity(), None);
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn identity_without_token_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        let json = serde_json::to_string(&identity(Role::Regular)).unwrap();
        storage.set_item(USER_KEY, &json).unwrap();

        let store = store_with(storage);
        assert_eq!(store.identity(), None);
    }

    #[test]
    fn empty_token_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_KEY, "").unwrap();
        assert!(!store_with(storage).is_authenticated());
    }

    #[test]
    fn headless_store_is_inert() {
        let store = SessionStore::new(&Platform::headless());
        store.set_session("tok", &identity(Role::Organizer));
        assert_eq!(store.token(), None);
        assert_eq!(store.identity(), None);
        store.clear_session();
    }

    #[test]
    fn replace_identity_requires_token() {
        let store = SessionStore::in_memory();
        store.replace_identity(&identity(Role::Regular));
        assert_eq!(store.identity(), None);

        store.set_session("tok", &identity(Role::Regular));
        let mut updated = identity(Role::Regular);
        updated.name = "Maria S.".to_string();
        store.replace_identity(&updated);
        assert_eq!(store.identity(), Some(updated));
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set_session("tok", &identity(Role::Organizer));
        assert_eq!(other.token().as_deref(), Some("tok"));
    }

    #[test]
    fn file_backed_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let platform = Platform::detect(Some(dir.path().to_path_buf()));
        SessionStore::new(&platform).set_session("tok", &identity(Role::Organizer));

        let reopened = SessionStore::new(&Platform::detect(Some(dir.path().to_path_buf())));
        assert_eq!(reopened.identity(), Some(identity(Role::Organizer)));
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Organizer), Just(Role::Regular)]
    }

    proptest! {
        #[test]
        fn set_session_round_trips(
            token in "[A-Za-z0-9._-]{1,64}",
            id in "[0-9]{1,6}",
            name in "\\PC{0,40}",
            department in proptest::option::of("[a-zA-Z ]{0,20}"),
            role in arb_role(),
        ) {
            let identity = Identity {
                id,
                name,
                email: "user@example.com".to_string(),
                phone: "11999990000".to_string(),
                role,
                department,
            };

            let store = SessionStore::in_memory();
            store.set_session(&token, &identity);
            prop_assert_eq!(store.token(), Some(token.clone()));
            prop_assert_eq!(store.identity(), Some(identity));

            store.clear_session();
            prop_assert_eq!(store.token(), None);
            prop_assert_eq!(store.identity(), None);
        }
    }
}
