//! watchpost - CLI front end for the capture-link core.
//!
//! This is a thin wrapper over the watchpost libraries: it keeps the token
//! table, capture vault, config, and admin session under a data directory
//! and drives the gate the way a hosting web layer would.

mod cli;
mod commands;
mod config;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Init(args) => commands::init::run(args, data_dir).await,
        Commands::Link(cmd) => commands::link::handle(cmd, data_dir).await,
        Commands::Open(args) => commands::open::run(args, data_dir).await,
        Commands::Capture(args) => commands::capture::run(args, data_dir).await,
        Commands::Admin(cmd) => commands::admin::handle(cmd, data_dir).await,
    }
}

/// Map `-v` counts onto an `EnvFilter` level; `RUST_LOG` wins when set.
fn init_logging(verbosity: u8, json: bool) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}
