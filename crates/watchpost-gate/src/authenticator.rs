//! Operator credential check and session registry.

use std::collections::HashMap;
use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use watchpost_core::error::AuthError;
use watchpost_core::types::SessionId;
use watchpost_core::{Credentials, Result};

/// The single configured admin credential pair.
///
/// The password is held only as a bcrypt hash; the plaintext is dropped at
/// construction time.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    username: String,
    password_hash: String,
}

impl AdminConfig {
    /// Hash a plaintext password into a config.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        let password_hash = hash(password, DEFAULT_COST).map_err(|e| AuthError::BadConfig {
            message: e.to_string(),
        })?;

        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    /// Rebuild a config from persisted parts.
    pub fn from_parts(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns the configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the bcrypt password hash, for persistence.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Verifies operator credentials and tracks authenticated sessions.
///
/// Each operator session is an explicit entry keyed by [`SessionId`]; there
/// is no ambient "logged in" global. Handles are cheap to clone and share
/// one registry.
///
/// A credential mismatch is a normal outcome (`login` returns `false` and
/// leaves the session unauthenticated), not an error.
#[derive(Debug, Clone)]
pub struct AdminAuthenticator {
    config: Arc<AdminConfig>,
    sessions: Arc<Mutex<HashMap<SessionId, bool>>>,
}

impl AdminAuthenticator {
    /// Create an authenticator for the configured credential pair.
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Open a fresh, unauthenticated session.
    pub async fn open_session(&self) -> SessionId {
        let id = SessionId::generate();
        self.sessions.lock().await.insert(id.clone(), false);
        debug!(session = %id, "Opened admin session");
        id
    }

    /// Re-register a session that an external transport layer has already
    /// authenticated (e.g. one restored from the CLI's session file).
    pub async fn restore(&self, id: SessionId) {
        self.sessions.lock().await.insert(id, true);
    }

    /// Attempt to authenticate a session.
    ///
    /// Returns `true` and marks the session authenticated on a match;
    /// returns `false` — leaving session state unchanged — on a mismatch or
    /// an unknown session id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configured hash cannot be processed.
    #[instrument(skip(self, credentials), fields(session = %id, username = %credentials.username()))]
    pub async fn login(&self, id: &SessionId, credentials: &Credentials) -> Result<bool> {
        // The username comparison and hash verification run regardless of
        // session existence, so an unknown session costs the same as a bad
        // password.
        let username_ok = credentials.username() == self.config.username;
        let password_ok =
            verify(credentials.password(), &self.config.password_hash).map_err(|e| {
                AuthError::Verification {
                    message: e.to_string(),
                }
            })?;

        if !(username_ok && password_ok) {
            debug!("Login rejected");
            return Ok(false);
        }

        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(id) {
            Some(authenticated) => {
                *authenticated = true;
                info!("Login accepted");
                Ok(true)
            }
            None => {
                debug!("Login rejected: unknown session");
                Ok(false)
            }
        }
    }

    /// Mark a session unauthenticated. Unknown ids are a no-op.
    #[instrument(skip(self), fields(session = %id))]
    pub async fn logout(&self, id: &SessionId) {
        if let Some(authenticated) = self.sessions.lock().await.get_mut(id) {
            *authenticated = false;
            info!("Logged out");
        }
    }

    /// Pure read of a session's authenticated flag.
    pub async fn is_authenticated(&self, id: &SessionId) -> bool {
        self.sessions
            .lock()
            .await
            .get(id)
            .copied()
            .unwrap_or(false)
    }
}
