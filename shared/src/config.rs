//! Configuration management for the messages client.

use std::env;

use crate::{Error, Result};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Port used when only `API_HOST` is set.
pub const DEFAULT_PORT: u16 = 8000;

/// Backend API configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the messages backend, without a trailing slash
    base_url: String,
}

impl ApiConfig {
    /// Create a configuration pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Precedence: `API_BASE_URL`, then `API_HOST` + `API_PORT`, then
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("API_BASE_URL") {
            return Ok(Self::new(url.trim()));
        }

        if let Some(host) = var("API_HOST") {
            let port = match var("API_PORT") {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::Config(format!("API_PORT must be a port number, got {:?}", raw))
                })?,
                None => DEFAULT_PORT,
            };
            return Ok(Self::new(format!("http://{}:{}", host.trim(), port)));
        }

        Ok(Self::new(DEFAULT_BASE_URL))
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path such as `/messages`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
