//! Link subcommand implementations.

mod create;
mod list;
mod revoke;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct LinkCommand {
    #[command(subcommand)]
    pub command: LinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LinkSubcommand {
    /// Issue a new capture link
    Create(create::CreateArgs),

    /// List live capture links
    List(list::ListArgs),

    /// Revoke a capture link
    Revoke(revoke::RevokeArgs),
}

pub async fn handle(cmd: LinkCommand, data_dir: Option<&Path>) -> Result<()> {
    match cmd.command {
        LinkSubcommand::Create(args) => create::run(args, data_dir).await,
        LinkSubcommand::List(args) => list::run(args, data_dir).await,
        LinkSubcommand::Revoke(args) => revoke::run(args, data_dir).await,
    }
}
