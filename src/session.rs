//! Session credentials and their lifecycle
//!
//! Credentials are an explicit [`Session`] object injected into the client,
//! never global state. A session moves through `create -> active ->
//! renewed* -> destroyed`; persisted tokens survive process restarts so a
//! user stays logged in across runs.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// The access/refresh token pair issued by `POST /token/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokens {
    /// Short-lived bearer credential attached to every API request
    pub access: String,

    /// Longer-lived credential used solely to obtain a new access token
    pub refresh: String,
}

/// Persists session tokens to disk, scoped per API origin
pub struct SessionStore {
    /// Base directory for session files
    base_dir: PathBuf,

    /// API base URL this store is scoped to
    base_url: String,
}

impl SessionStore {
    /// Create a session store under the given directory
    pub fn new(base_dir: PathBuf, base_url: impl Into<String>) -> Result<Self> {
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)
                .map_err(|e| Error::Internal(format!("Failed to create session dir: {e}")))?;
        }

        Ok(Self {
            base_dir,
            base_url: base_url.into(),
        })
    }

    /// Create a store in the default location (~/.questlog/sessions)
    pub fn default_location(base_url: impl Into<String>) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Internal("Cannot determine home directory".to_string()))?;

        Self::new(home.join(".questlog").join("sessions"), base_url)
    }

    /// Derive the file path for this origin's tokens
    fn session_path(&self) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(self.base_url.as_bytes());
        let hash = hasher.finalize();
        let key = format!("{hash:x}")[..16].to_string();
        self.base_dir.join(format!("{key}_session.json"))
    }

    /// Load the persisted token pair, if any
    pub fn load(&self) -> Option<SessionTokens> {
        let path = self.session_path();

        if !path.exists() {
            debug!(origin = %self.base_url, "No stored session found");
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionTokens>(&content) {
                Ok(tokens) => {
                    info!(origin = %self.base_url, "Loaded stored session");
                    Some(tokens)
                }
                Err(e) => {
                    warn!(origin = %self.base_url, error = %e, "Failed to parse stored session");
                    None
                }
            },
            Err(e) => {
                warn!(origin = %self.base_url, error = %e, "Failed to read session file");
                None
            }
        }
    }

    /// Persist the token pair
    pub fn save(&self, tokens: &SessionTokens) -> Result<()> {
        let path = self.session_path();

        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| Error::Internal(format!("Failed to serialize session: {e}")))?;

        fs::write(&path, content)
            .map_err(|e| Error::Internal(format!("Failed to write session file: {e}")))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&path, perms);
        }

        debug!(origin = %self.base_url, "Saved session tokens");
        Ok(())
    }

    /// Delete any persisted tokens
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();

        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Internal(format!("Failed to delete session file: {e}")))?;
            info!(origin = %self.base_url, "Cleared stored session");
        }

        Ok(())
    }
}

/// An explicit session object holding the current credential pair.
///
/// At most one access token and one refresh token are valid at any time.
/// [`Session::renew_access`] replaces the access token in memory and on disk
/// under the write lock, before any retried request is dispatched.
pub struct Session {
    tokens: RwLock<Option<SessionTokens>>,
    store: SessionStore,
}

impl Session {
    /// Create a session, loading any persisted tokens for this origin
    #[must_use]
    pub fn new(store: SessionStore) -> Arc<Self> {
        let tokens = store.load();
        Arc::new(Self {
            tokens: RwLock::new(tokens),
            store,
        })
    }

    /// Activate the session with a freshly issued token pair (login/register)
    pub fn activate(&self, tokens: SessionTokens) -> Result<()> {
        self.store.save(&tokens)?;
        *self.tokens.write() = Some(tokens);
        info!("Session activated");
        Ok(())
    }

    /// Replace the access token after a successful renewal. The refresh
    /// token is kept as-is.
    pub fn renew_access(&self, access: String) -> Result<()> {
        let mut guard = self.tokens.write();
        let Some(tokens) = guard.as_mut() else {
            return Err(Error::Internal(
                "Cannot renew access token: no active session".to_string(),
            ));
        };
        tokens.access = access;
        self.store.save(tokens)?;
        info!("Access token renewed");
        Ok(())
    }

    /// Destroy the session: clear tokens from memory and disk
    pub fn destroy(&self) {
        *self.tokens.write() = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        info!("Session destroyed");
    }

    /// Current access token, if the session is active
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.access.clone())
    }

    /// Current refresh token, if the session is active
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.refresh.clone())
    }

    /// Whether the session currently holds credentials
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tokens.read().is_some()
    }
}
