//! Init command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use watchpost_gate::AdminConfig;

use crate::config::{self, AppConfig};
use crate::output;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Admin username
    #[arg(long)]
    pub username: String,

    /// Admin password (stored only as a bcrypt hash)
    #[arg(long)]
    pub password: String,

    /// Base URL that issued capture links are built on
    #[arg(long, default_value = "http://localhost:8501/")]
    pub base_url: String,
}

pub async fn run(args: InitArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;

    url::Url::parse(&args.base_url).context("Invalid base URL")?;

    let admin = AdminConfig::new(&args.username, &args.password)
        .context("Failed to hash admin password")?;

    config::save_config(
        &data_dir,
        &AppConfig {
            username: admin.username().to_string(),
            password_hash: admin.password_hash().to_string(),
            base_url: args.base_url,
        },
    )?;

    output::success("Initialized");
    output::field("Data dir", &data_dir.display().to_string());
    output::field("Admin", admin.username());

    Ok(())
}
