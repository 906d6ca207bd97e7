//! Link create command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use watchpost_core::token::LinkMode;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue a reusable link instead of a single-use one
    #[arg(long)]
    pub multi: bool,
}

pub async fn run(args: CreateArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let mode = if args.multi {
        LinkMode::Multiple
    } else {
        LinkMode::Single
    };

    let url = gate
        .issue_link(mode)
        .await
        .context("Failed to issue capture link")?;

    println!("{}", url);
    output::success(match mode {
        LinkMode::Single => "Issued single-use capture link",
        LinkMode::Multiple => "Issued reusable capture link",
    });

    Ok(())
}
