//! Admin dashboard command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use watchpost_core::token::LinkMode;
use watchpost_gate::DashboardAccess;

use crate::config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DashboardArgs {}

pub async fn run(_args: DashboardArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let Some(stored) = session::load_session(&data_dir)? else {
        println!("Login required: run 'watchpost admin login'.");
        return Ok(());
    };
    gate.authenticator().restore(stored.clone()).await;

    let view = match gate
        .dashboard(&stored)
        .await
        .context("Failed to load dashboard")?
    {
        DashboardAccess::Granted(view) => view,
        DashboardAccess::LoginRequired => {
            println!("Login required: run 'watchpost admin login'.");
            return Ok(());
        }
    };

    output::field("Total captures", &view.stats.total.to_string());
    output::field("With audio", &view.stats.with_audio.to_string());
    output::field("Today", &view.stats.today.to_string());

    if !view.captures.is_empty() {
        println!();
        println!("Captures (newest first):");
        for record in &view.captures {
            println!(
                "  {}  {} image bytes  {}",
                record.key(),
                record.meta.image_bytes,
                if record.meta.has_audio {
                    "audio"
                } else {
                    "no audio"
                }
            );
        }
    }

    if !view.links.is_empty() {
        println!();
        println!("Live links:");
        for link in &view.links {
            let mode = match link.mode {
                LinkMode::Single => "single",
                LinkMode::Multiple => "multi",
            };
            println!("  {}  {:6}  {}", link.id, mode, gate.share_url(&link.id));
        }
    }

    Ok(())
}
