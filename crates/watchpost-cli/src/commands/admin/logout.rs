//! Admin logout command implementation.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;

    match session::load_session(&data_dir)? {
        Some(_) => {
            // Removing the stored session is the durable logout; the
            // in-process registry dies with this invocation anyway.
            session::clear_session(&data_dir)?;
            output::success("Logged out");
        }
        None => {
            println!("No active session.");
        }
    }

    Ok(())
}
