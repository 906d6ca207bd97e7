//! Capture command implementation: the full link-holder flow.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use watchpost_core::types::TokenId;
use watchpost_gate::{GateRequest, Outcome};

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Capture-link token authorizing this capture
    #[arg(long)]
    pub token: String,

    /// Image file to submit
    #[arg(long)]
    pub image: PathBuf,

    /// Audio file to submit (optional)
    #[arg(long)]
    pub audio: Option<PathBuf>,
}

pub async fn run(args: CaptureArgs, data_dir: Option<&Path>) -> Result<()> {
    let data_dir = config::data_dir(data_dir)?;
    let gate = config::build_gate(&data_dir)?;

    let token = TokenId::new(&args.token).context("Invalid token id")?;

    // Token consumption happens first; the blobs are read (the stand-in for
    // the hardware capture) only once the request is admitted.
    match gate
        .route(&GateRequest::with_token(token))
        .await
        .context("Routing failed")?
    {
        Outcome::CaptureFlow => {}
        Outcome::Rejected { reason } => bail!(reason),
        outcome => bail!("unexpected routing outcome: {:?}", outcome),
    }

    let image = fs::read(&args.image)
        .with_context(|| format!("Failed to read image file {}", args.image.display()))?;
    let audio = args
        .audio
        .as_ref()
        .map(|path| {
            fs::read(path).with_context(|| format!("Failed to read audio file {}", path.display()))
        })
        .transpose()?;

    let record = gate
        .record_capture(image, audio)
        .await
        .context("Failed to save capture")?;

    println!("{}", record.key());
    output::success(&format!(
        "Captured ({} image bytes{})",
        record.meta.image_bytes,
        if record.meta.has_audio {
            format!(", {} audio bytes", record.meta.audio_bytes)
        } else {
            ", no audio".to_string()
        }
    ));

    Ok(())
}
