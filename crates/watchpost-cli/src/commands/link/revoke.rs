//! Link revoke command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use watchpost_core::types::TokenId;
use watchpost_core::TokenStore;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Token id of the link to revoke
    pub token: String,
}

pub async fn run(args: RevokeArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let id = TokenId::new(&args.token).context("Invalid token id")?;

    // Revocation is idempotent; an unknown id is not an error.
    gate.tokens()
        .revoke(&id)
        .await
        .context("Failed to revoke capture link")?;

    output::success(&format!("Revoked {}", id));

    Ok(())
}
