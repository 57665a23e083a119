//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use figment::{Figment, providers::Env, providers::Serialized};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default API base path
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Questlog client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds (applies to every dispatch, renewal included)
    pub timeout_secs: u64,

    /// Directory for persisted session credentials.
    /// Defaults to `~/.questlog/sessions` when unset.
    pub session_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            session_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment (`QUESTLOG_*` variables),
    /// reading a `.env` file first if one is present.
    ///
    /// Recognized variables: `QUESTLOG_BASE_URL`, `QUESTLOG_TIMEOUT_SECS`,
    /// `QUESTLOG_SESSION_DIR`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("QUESTLOG_"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validated()
    }

    /// Create a configuration for a specific base URL, other fields default.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .validated()
    }

    /// Validate and normalize the configuration
    pub fn validated(mut self) -> Result<Self> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {e}", self.base_url)))?;

        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }

        Ok(self)
    }

    /// Request timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a resource path onto the base URL. Paths follow the backend
    /// convention of leading and trailing slashes (`/quests/`, `/users/me/`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
