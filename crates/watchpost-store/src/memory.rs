//! In-memory token store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use watchpost_core::token::{CaptureLink, ConsumeResult, LinkMode};
use watchpost_core::types::TokenId;
use watchpost_core::{Result, TokenStore};

/// The shared, in-process token table.
///
/// Handles are cheap to clone (internal `Arc`) and all clones see the same
/// table, so a token issued from one request context is consumable from any
/// other. All mutation happens inside one mutex hold, which makes the
/// single-use check-and-invalidate linearizable: of any number of concurrent
/// consumers of a `Single` token, exactly one wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<Mutex<TokenTable>>,
}

#[derive(Debug, Default)]
struct TokenTable {
    entries: HashMap<TokenId, TokenEntry>,
    // Issuance order, for admin listing.
    order: Vec<TokenId>,
}

#[derive(Debug)]
struct TokenEntry {
    mode: LinkMode,
    created_at: chrono::DateTime<Utc>,
    consumed: bool,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    #[instrument(skip(self))]
    async fn issue(&self, mode: LinkMode) -> Result<TokenId> {
        let mut table = self.inner.lock().await;

        // Freshly generated ids collide with astronomically low probability,
        // but the contract is "never", so check against the live set.
        let id = loop {
            let candidate = TokenId::generate();
            if !table.entries.contains_key(&candidate) {
                break candidate;
            }
        };

        table.entries.insert(
            id.clone(),
            TokenEntry {
                mode,
                created_at: Utc::now(),
                consumed: false,
            },
        );
        table.order.push(id.clone());

        debug!(token = %id, ?mode, "Issued capture link token");

        Ok(id)
    }

    #[instrument(skip(self), fields(token = %id))]
    async fn validate_and_consume(&self, id: &TokenId) -> Result<ConsumeResult> {
        let mut table = self.inner.lock().await;

        let result = match table.entries.get_mut(id) {
            None => ConsumeResult::Invalid,
            Some(entry) => match entry.mode {
                LinkMode::Multiple => ConsumeResult::Valid,
                LinkMode::Single if entry.consumed => ConsumeResult::Invalid,
                LinkMode::Single => {
                    entry.consumed = true;
                    ConsumeResult::Valid
                }
            },
        };

        debug!(?result, "Validated capture link token");

        Ok(result)
    }

    #[instrument(skip(self), fields(token = %id))]
    async fn revoke(&self, id: &TokenId) -> Result<()> {
        let mut table = self.inner.lock().await;

        if table.entries.remove(id).is_some() {
            table.order.retain(|t| t != id);
            debug!("Revoked capture link token");
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CaptureLink>> {
        let table = self.inner.lock().await;

        Ok(table
            .order
            .iter()
            .filter_map(|id| {
                let entry = table.entries.get(id)?;
                (!entry.consumed).then(|| CaptureLink {
                    id: id.clone(),
                    mode: entry.mode,
                    created_at: entry.created_at,
                })
            })
            .collect())
    }
}
