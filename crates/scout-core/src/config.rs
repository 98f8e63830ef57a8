//! Backend endpoint configuration.
//!
//! The base URL is injected into each client at construction so tests can
//! point at a local mock server without touching the process environment.

use std::env;

/// Environment variable that overrides the backend origin.
pub const API_URL_ENV: &str = "SCOUT_API_URL";

/// Development origin used when no override is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Connection settings shared by all Scout API clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    /// Creates a config pointing at an explicit origin.
    ///
    /// A trailing slash on the origin is tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Loads the backend origin from `SCOUT_API_URL`, falling back to the
    /// local development origin when unset.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Returns the configured origin without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a path onto the configured origin.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
