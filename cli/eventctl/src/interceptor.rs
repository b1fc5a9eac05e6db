//! Request augmentation applied to every outgoing API call.
//!
//! 1. Relative paths get the backend base address prepended.
//! 2. The session token, when present, is attached as a bearer credential.
//!
//! Base address and token are read fresh for every request.

use std::sync::{Arc, RwLock};

use eventdesk_session::SessionStore;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::debug;

use crate::error::CliError;
use crate::transport::ApiRequest;

/// Shared, replaceable backend base address.
#[derive(Debug, Clone)]
pub struct BaseUrl(Arc<RwLock<String>>);

impl BaseUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(url.into())))
    }

    pub fn get(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, url: impl Into<String>) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = url.into();
    }
}

/// Whether `url` already names a transport scheme.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Join `base` and a relative `path` with exactly one separator.
pub fn join_url(base: &str, path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[derive(Debug, Clone)]
pub struct RequestAugmenter {
    base_url: BaseUrl,
    session: SessionStore,
}

impl RequestAugmenter {
    pub fn new(base_url: BaseUrl, session: SessionStore) -> Self {
        Self { base_url, session }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn augment(&self, mut request: ApiRequest) -> Result<ApiRequest, CliError> {
        if !is_absolute(&request.url) {
            request.url = join_url(&self.base_url.get(), &request.url);
        }

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| CliError::InvalidToken)?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            authenticated = request.headers.contains_key(AUTHORIZATION),
            "Augmented request"
        );
        Ok(request)
    }
}
