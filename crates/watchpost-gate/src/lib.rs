//! watchpost-gate - Admin authentication and request routing.
//!
//! [`AdminAuthenticator`] checks operator credentials against a single
//! configured bcrypt hash and tracks per-session authenticated flags.
//! [`CaptureGate`] is the decision layer in front of everything: for each
//! incoming request it either admits a capture (consuming the presented
//! token), shows the dashboard, demands login, or rejects.

mod authenticator;
mod gate;

pub use authenticator::{AdminAuthenticator, AdminConfig};
pub use gate::{CaptureGate, DashboardAccess, DashboardView, GateRequest, Outcome, INVALID_LINK};
