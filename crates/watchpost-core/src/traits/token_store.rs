//! Capture-link token store trait.

use async_trait::async_trait;

use crate::token::{CaptureLink, ConsumeResult, LinkMode};
use crate::types::TokenId;
use crate::Result;

/// The authoritative, process-wide set of live capture-link tokens.
///
/// A token issued through one handle must be consumable through any other
/// handle of the same store: implementations are shared-state, and the
/// single-use check-and-invalidate is atomic across concurrent callers.
/// Exactly one of any number of racing `validate_and_consume` calls on a
/// `Single` token observes [`ConsumeResult::Valid`].
///
/// Unknown ids are an expected, recoverable condition — links get guessed,
/// mistyped, and reused — so lookups report [`ConsumeResult::Invalid`] or
/// no-op instead of failing. `Err` is reserved for faults of the store
/// itself (e.g. unreadable persisted state).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Issue a fresh token and return its id.
    ///
    /// The id never collides with a live token's id.
    async fn issue(&self, mode: LinkMode) -> Result<TokenId>;

    /// Look up a token and, for `Single` mode, consume it.
    ///
    /// For a `Single` token the lookup and invalidation are one indivisible
    /// step. A `Multiple` token is left untouched and stays valid.
    async fn validate_and_consume(&self, id: &TokenId) -> Result<ConsumeResult>;

    /// Remove a token immediately, regardless of mode.
    ///
    /// Revoking an unknown id is a no-op, not an error.
    async fn revoke(&self, id: &TokenId) -> Result<()>;

    /// List live tokens in insertion order, for admin visibility.
    ///
    /// Consumed `Single` tokens do not appear.
    async fn list(&self) -> Result<Vec<CaptureLink>>;
}
