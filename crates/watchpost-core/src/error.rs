//! Error types for the watchpost libraries.
//!
//! This module provides a unified error type with explicit variants for
//! authentication, storage, and input validation errors. Expected outcomes
//! such as an unknown or already-consumed token are *not* errors; they are
//! modelled as [`ConsumeResult::Invalid`](crate::token::ConsumeResult) so
//! callers cannot confuse a guessed link with a broken store.

use thiserror::Error;

/// The unified error type for watchpost operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication errors (bad credential material, unknown session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Storage errors (persistence unavailable, corrupt state on disk).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid token id, stamp, or URL format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Authentication-related errors.
///
/// A plain credential mismatch is reported as `login(..) == false`, not as an
/// error; these variants cover failures of the credential machinery itself.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured password hash could not be processed.
    #[error("credential verification failed: {message}")]
    Verification { message: String },

    /// The stored credential configuration is unusable.
    #[error("credential configuration invalid: {message}")]
    BadConfig { message: String },
}

/// Storage-level errors.
///
/// A write failure must reach the operator-facing layer; captures are never
/// silently dropped.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing persisted state failed.
    #[error("write failed: {message}")]
    Write { message: String },

    /// Reading persisted state failed.
    #[error("read failed: {message}")]
    Read { message: String },

    /// Persisted state exists but could not be understood.
    #[error("corrupt state: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid token id format.
    #[error("invalid token id '{value}': {reason}")]
    TokenId { value: String, reason: String },

    /// Invalid capture stamp format.
    #[error("invalid capture stamp '{value}': {reason}")]
    Stamp { value: String, reason: String },

    /// Invalid session id format.
    #[error("invalid session id '{value}': {reason}")]
    SessionId { value: String, reason: String },

    /// An image blob is required and must be non-empty.
    #[error("capture image is empty")]
    EmptyImage,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
