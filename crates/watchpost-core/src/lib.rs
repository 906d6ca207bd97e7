//! watchpost-core - Core types and traits for the watchpost capture-link toolkit.
//!
//! Watchpost lets an operator hand out unguessable capture links, accept the
//! image/audio blobs a link-holder produces, and review the results behind an
//! authenticated dashboard. This crate holds the shared vocabulary: validated
//! id and timestamp types, the token and capture data model, the [`TokenStore`]
//! and [`CaptureVault`] traits, and the unified [`Error`] type. Concrete store
//! implementations live in `watchpost-store`; the request-routing gate lives in
//! `watchpost-gate`.

pub mod capture;
pub mod credentials;
pub mod error;
pub mod token;
pub mod traits;
pub mod types;

pub use capture::{CaptureMeta, CaptureRecord, CaptureStats};
pub use credentials::Credentials;
pub use error::Error;
pub use token::{CaptureLink, ConsumeResult, LinkMode};
pub use traits::{CaptureVault, TokenStore};
pub use types::{CaptureStamp, SessionId, TokenId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
