//! Platform capability check.
//!
//! Decides once, up front, whether this execution context has somewhere to
//! keep a session. Everything downstream asks the [`Platform`] value instead
//! of probing the environment again.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tracing::debug;

use crate::storage::{FileStorage, MemoryStorage, SessionStorage};

/// Name of the session file inside the session directory.
pub const SESSION_FILE: &str = "session.json";

/// Execution context as far as session storage is concerned.
#[derive(Clone)]
pub enum Platform {
    /// Session storage is available.
    Interactive(Arc<dyn SessionStorage>),
    /// No storage (pre-render, sandboxed or otherwise headless context).
    Headless,
}

impl Platform {
    /// Probe for a session directory.
    ///
    /// An explicit `dir` wins; otherwise the OS config directory is used.
    /// When neither resolves the platform is headless.
    pub fn detect(dir: Option<PathBuf>) -> Self {
        let dir = dir.or_else(|| {
            ProjectDirs::from("dev", "eventdesk", "evd").map(|dirs| dirs.config_dir().to_path_buf())
        });

        match dir {
            Some(dir) => {
                let path = dir.join(SESSION_FILE);
                debug!(path = ?path, "Using file-backed session storage");
                Self::Interactive(Arc::new(FileStorage::new(path)))
            }
            None => {
                debug!("No session directory available; running headless");
                Self::Headless
            }
        }
    }

    /// Storage that lives as long as the process.
    pub fn in_memory() -> Self {
        Self::Interactive(Arc::new(MemoryStorage::new()))
    }

    pub fn headless() -> Self {
        Self::Headless
    }

    pub fn with_storage(storage: Arc<dyn SessionStorage>) -> Self {
        Self::Interactive(storage)
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    pub fn storage(&self) -> Option<&Arc<dyn SessionStorage>> {
        match self {
            Self::Interactive(storage) => Some(storage),
            Self::Headless => None,
        }
    }

    /// Run `f` against the storage, or return `None` when headless.
    pub fn run_with_storage<T>(&self, f: impl FnOnce(&dyn SessionStorage) -> T) -> Option<T> {
        self.storage().map(|storage| f(storage.as_ref()))
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive(_) => f.write_str("Platform::Interactive"),
            Self::Headless => f.write_str("Platform::Headless"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let platform = Platform::detect(Some(dir.path().to_path_buf()));
        assert!(platform.is_interactive());
    }

    #[test]
    fn headless_skips_storage_work() {
        let platform = Platform::headless();
        assert!(!platform.is_interactive());
        assert_eq!(platform.run_with_storage(|_| "ran"), None);
    }

    #[test]
    fn in_memory_runs_storage_work() {
        let platform = Platform::in_memory();
        let result = platform.run_with_storage(|storage| {
            storage.set_item("k", "v").unwrap();
            storage.get_item("k").unwrap()
        });
        assert_eq!(result, Some(Some("v".to_string())));
    }
}
