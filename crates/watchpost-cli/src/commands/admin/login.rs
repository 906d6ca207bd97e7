//! Admin login command implementation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use watchpost_core::Credentials;

use crate::config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Admin username
    #[arg(long)]
    pub username: String,

    /// Admin password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;
    let auth = gate.authenticator();

    eprintln!("{}", "Logging in...".dimmed());

    let session = auth.open_session().await;
    let credentials = Credentials::new(&args.username, &args.password);

    let ok = auth
        .login(&session, &credentials)
        .await
        .context("Failed to verify credentials")?;

    if !ok {
        bail!("Invalid credentials");
    }

    session::save_session(&data_dir, &session).context("Failed to save session")?;

    output::success("Logged in");
    output::field("Session", &session.to_string());

    Ok(())
}
