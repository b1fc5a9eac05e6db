//! Configuration management.
//!
//! Handles:
//! - API base address
//! - Where the session lives
//! - Transport timeout and log level

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

const DEFAULT_API_URL: &str = "http://localhost:8000/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Get the config directory path.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "eventdesk", "evd")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Não foi possível determinar o diretório de configuração"))
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base address. Relative API paths are appended to it.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory holding the session file. Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log filter used when `EVD_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            session_dir: None,
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILE);

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Falha ao ler a configuração em {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Configuração inválida em {:?}", path))?
        } else {
            Self::default()
        };

        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply `EVD_*` overrides from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("EVD_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(dir) = lookup("EVD_SESSION_DIR").filter(|v| !v.trim().is_empty()) {
            self.session_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = lookup("EVD_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Get the API URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir)?;

        let path = dir.join(CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&path, contents)
                .with_context(|| format!("Falha ao gravar a configuração em {:?}", path))?;
        }

        Ok(())
    }
}
