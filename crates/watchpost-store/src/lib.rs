//! watchpost-store - Store implementations for the watchpost core.
//!
//! Two token stores share one contract ([`watchpost_core::TokenStore`]):
//! [`MemoryTokenStore`] keeps the live token table behind a process-wide
//! mutex, and [`FileTokenStore`] persists it to disk under an advisory file
//! lock so the single-use guarantee also holds across processes.
//! [`FileVault`] persists capture records, one directory per record.

mod memory;
mod tokens;
mod vault;

pub use memory::MemoryTokenStore;
pub use tokens::FileTokenStore;
pub use vault::FileVault;
