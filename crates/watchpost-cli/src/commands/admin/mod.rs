//! Admin subcommand implementations.

mod dashboard;
mod login;
mod logout;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// Authenticate and store the admin session
    Login(login::LoginArgs),

    /// Discard the stored admin session
    Logout(logout::LogoutArgs),

    /// Show captures, statistics, and live links
    Dashboard(dashboard::DashboardArgs),
}

pub async fn handle(cmd: AdminCommand, data_dir: Option<&Path>) -> Result<()> {
    match cmd.command {
        AdminSubcommand::Login(args) => login::run(args, data_dir).await,
        AdminSubcommand::Logout(args) => logout::run(args, data_dir).await,
        AdminSubcommand::Dashboard(args) => dashboard::run(args, data_dir).await,
    }
}
