//! Link list command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use watchpost_core::token::LinkMode;
use watchpost_core::TokenStore;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {}

pub async fn run(_args: ListArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let links = gate
        .tokens()
        .list()
        .await
        .context("Failed to list capture links")?;

    if links.is_empty() {
        println!("No live capture links.");
        return Ok(());
    }

    for link in &links {
        let mode = match link.mode {
            LinkMode::Single => "single",
            LinkMode::Multiple => "multi",
        };
        // Creation times are stored UTC; show them in the operator's zone.
        println!(
            "{}  {:6}  {}  {}",
            link.id,
            mode,
            link.created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            gate.share_url(&link.id)
        );
    }
    output::field("Total", &links.len().to_string());

    Ok(())
}
