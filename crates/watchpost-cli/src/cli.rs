//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::admin::AdminCommand;
use crate::commands::capture::CaptureArgs;
use crate::commands::init::InitArgs;
use crate::commands::link::LinkCommand;
use crate::commands::open::OpenArgs;

/// Capture-link issuance, request routing, and capture review.
#[derive(Parser, Debug)]
#[command(name = "watchpost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure admin credentials and the share-link base URL
    Init(InitArgs),

    /// Issue, list, and revoke capture links
    Link(LinkCommand),

    /// Run one request through the gate and print the outcome
    Open(OpenArgs),

    /// Submit capture blobs for a token (the full capture flow)
    Capture(CaptureArgs),

    /// Admin session and dashboard operations
    Admin(AdminCommand),
}
