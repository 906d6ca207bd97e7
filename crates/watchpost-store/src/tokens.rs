//! File-backed token store.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use watchpost_core::error::{Error, StorageError};
use watchpost_core::token::{CaptureLink, ConsumeResult, LinkMode};
use watchpost_core::types::TokenId;
use watchpost_core::{Result, TokenStore};

fn map_read(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Read {
        message: err.to_string(),
    })
}

fn map_write(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Write {
        message: err.to_string(),
    })
}

/// One token as persisted in `tokens.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    id: TokenId,
    mode: LinkMode,
    created_at: DateTime<Utc>,
    consumed: bool,
}

/// Token store persisted to `tokens.json` under the given root directory.
///
/// Every operation is a read-modify-write of the whole table, run while
/// holding an exclusive advisory lock on a sibling `tokens.lock` file. That
/// makes the single-use check-and-invalidate atomic across processes, not
/// just across tasks: two CLI invocations racing on the same `Single` token
/// serialize on the lock and only the first sees `Valid`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    root: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory and the table file are created lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn table_path(&self) -> PathBuf {
        self.root.join("tokens.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("tokens.lock")
    }

    /// Run `f` over the persisted table under the exclusive lock, writing the
    /// table back if `f` reports it dirty.
    fn with_table<R>(&self, f: impl FnOnce(&mut Vec<StoredToken>) -> (R, bool)) -> Result<R> {
        fs::create_dir_all(&self.root).map_err(map_write)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_write)?;
        lock_file.lock_exclusive().map_err(map_write)?;

        let result = self.with_table_locked(f);

        // Advisory lock is also released on drop; unlock eagerly so the
        // error, if any, is observable.
        let _ = FileExt::unlock(&lock_file);

        result
    }

    fn with_table_locked<R>(
        &self,
        f: impl FnOnce(&mut Vec<StoredToken>) -> (R, bool),
    ) -> Result<R> {
        let table_path = self.table_path();

        let mut table: Vec<StoredToken> = if table_path.exists() {
            let content = fs::read_to_string(&table_path).map_err(map_read)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Storage(StorageError::Corrupt {
                    message: format!("{}: {}", table_path.display(), e),
                })
            })?
        } else {
            Vec::new()
        };

        let (result, dirty) = f(&mut table);

        if dirty {
            let content = serde_json::to_string_pretty(&table).map_err(|e| {
                Error::Storage(StorageError::Write {
                    message: e.to_string(),
                })
            })?;

            let temp_path = table_path.with_extension("tmp");
            fs::write(&temp_path, content).map_err(map_write)?;
            fs::rename(&temp_path, &table_path).map_err(map_write)?;
        }

        Ok(result)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    #[instrument(skip(self))]
    async fn issue(&self, mode: LinkMode) -> Result<TokenId> {
        let id = self.with_table(|table| {
            let id = loop {
                let candidate = TokenId::generate();
                if !table.iter().any(|t| t.id == candidate) {
                    break candidate;
                }
            };

            table.push(StoredToken {
                id: id.clone(),
                mode,
                created_at: Utc::now(),
                consumed: false,
            });

            (id, true)
        })?;

        debug!(token = %id, ?mode, "Issued capture link token");

        Ok(id)
    }

    #[instrument(skip(self), fields(token = %id))]
    async fn validate_and_consume(&self, id: &TokenId) -> Result<ConsumeResult> {
        let result = self.with_table(|table| {
            match table.iter_mut().find(|t| &t.id == id) {
                None => (ConsumeResult::Invalid, false),
                Some(token) => match token.mode {
                    LinkMode::Multiple => (ConsumeResult::Valid, false),
                    LinkMode::Single if token.consumed => (ConsumeResult::Invalid, false),
                    LinkMode::Single => {
                        token.consumed = true;
                        (ConsumeResult::Valid, true)
                    }
                },
            }
        })?;

        debug!(?result, "Validated capture link token");

        Ok(result)
    }

    #[instrument(skip(self), fields(token = %id))]
    async fn revoke(&self, id: &TokenId) -> Result<()> {
        self.with_table(|table| {
            let before = table.len();
            table.retain(|t| &t.id != id);
            ((), table.len() != before)
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CaptureLink>> {
        self.with_table(|table| {
            let links = table
                .iter()
                .filter(|t| !t.consumed)
                .map(|t| CaptureLink {
                    id: t.id.clone(),
                    mode: t.mode,
                    created_at: t.created_at,
                })
                .collect();
            (links, false)
        })
    }
}
