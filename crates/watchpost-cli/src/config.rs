//! Config storage and gate assembly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use watchpost_gate::{AdminAuthenticator, AdminConfig, CaptureGate};
use watchpost_store::{FileTokenStore, FileVault};

/// Persisted configuration: who the admin is and what issued links look like.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub username: String,
    pub password_hash: String,
    pub base_url: String,
}

/// The gate type every command operates on.
pub type CliGate = CaptureGate<FileTokenStore, FileVault>;

/// Resolve the data directory, honoring the `--data-dir` override.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let dirs =
        ProjectDirs::from("", "", "watchpost").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Write the config, creating the data directory if needed.
pub fn save_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    let json = serde_json::to_string_pretty(config)?;
    fs::write(config_path(data_dir), json).context("Failed to write config file")?;

    Ok(())
}

/// Load the config written by `watchpost init`.
pub fn load_config(data_dir: &Path) -> Result<AppConfig> {
    let path = config_path(data_dir);

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Not initialized. Run 'watchpost init' first ({})", path.display()))?;
    serde_json::from_str(&json).context("Invalid config file")
}

/// Assemble the gate over the file-backed stores under the data directory.
pub fn build_gate(data_dir: &Path) -> Result<CliGate> {
    let config = load_config(data_dir)?;

    let base_url = Url::parse(&config.base_url).context("Invalid base URL in config")?;
    let auth = AdminAuthenticator::new(AdminConfig::from_parts(
        &config.username,
        &config.password_hash,
    ));

    Ok(CaptureGate::new(
        FileTokenStore::new(data_dir),
        FileVault::new(data_dir),
        auth,
        base_url,
    ))
}
