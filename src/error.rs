//! Error types for the Questlog client

use std::io;

use thiserror::Error;

/// Result type alias for the Questlog client
pub type Result<T> = std::result::Result<T, Error>;

/// Questlog client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authorization failure that the renewal protocol could not absorb
    #[error("Unauthorized (HTTP {status}): {body}")]
    Unauthorized {
        /// HTTP status code (401)
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// Refresh token missing, expired, or rejected. The session has been
    /// destroyed by the time this is returned; `status` and `body` carry the
    /// original request's authorization failure.
    #[error("Session expired: credentials cleared after HTTP {status}: {body}")]
    SessionExpired {
        /// HTTP status of the original failed request (401)
        status: u16,
        /// Original response body, if any
        body: String,
    },

    /// Any other non-success API response. Never retried.
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for failures that end the session (renewal failed or impossible).
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// HTTP status carried by this error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. }
            | Self::Api { status, .. }
            | Self::SessionExpired { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
