//! Open command implementation: run one request through the gate.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use watchpost_core::types::TokenId;
use watchpost_gate::{GateRequest, Outcome};

use crate::config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Capture-link token carried by the request
    #[arg(long)]
    pub token: Option<String>,

    /// Request path ("admin" or empty; informational only — any request
    /// without a token takes the admin branch)
    #[arg(long)]
    pub path: Option<String>,
}

pub async fn run(args: OpenArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let token = args
        .token
        .as_deref()
        .map(TokenId::new)
        .transpose()
        .context("Invalid token id")?;

    // Without a token, the admin path and the bare root route identically.
    tracing::debug!(path = ?args.path, has_token = token.is_some(), "Opening request");

    let stored = session::load_session(&data_dir)?;
    if let Some(ref session) = stored {
        gate.authenticator().restore(session.clone()).await;
    }

    let request = GateRequest {
        token,
        session: stored,
    };

    match gate.route(&request).await.context("Routing failed")? {
        Outcome::CaptureFlow => {
            output::success("Capture permitted");
            println!("Submit blobs with 'watchpost capture' (a single-use link is now consumed).");
        }
        Outcome::Dashboard => {
            output::success("Authenticated");
            println!("Dashboard available: run 'watchpost admin dashboard'.");
        }
        Outcome::LoginPrompt => {
            println!("Login required: run 'watchpost admin login'.");
        }
        Outcome::Rejected { reason } => {
            output::error(&reason);
        }
    }

    Ok(())
}
