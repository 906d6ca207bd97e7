//! Admin session persistence between CLI invocations.
//!
//! The gate's session registry lives for one process. The CLI bridges
//! invocations by storing the session id of a successful login in the data
//! directory; commands restore it into the authenticator before routing.
//! Removing the file is the durable form of logout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use watchpost_core::types::SessionId;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    session: SessionId,
}

fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

/// Save an authenticated session to disk.
pub fn save_session(data_dir: &Path, session: &SessionId) -> Result<()> {
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    let stored = StoredSession {
        session: session.clone(),
    };
    let path = session_path(data_dir);
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load the stored session, if any.
pub fn load_session(data_dir: &Path) -> Result<Option<SessionId>> {
    let path = session_path(data_dir);

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    Ok(Some(stored.session))
}

/// Clear the stored session.
pub fn clear_session(data_dir: &Path) -> Result<()> {
    let path = session_path(data_dir);

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}
