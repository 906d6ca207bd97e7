//! Capture record store trait.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::capture::{CaptureRecord, CaptureStats};
use crate::types::CaptureStamp;
use crate::Result;

/// The append-only store of capture records.
///
/// Records are write-once, read-many: there is no update or delete. Readers
/// observe only fully written records, never a partial one.
#[async_trait]
pub trait CaptureVault: Send + Sync {
    /// Persist one capture and return the stored record.
    ///
    /// `has_audio` in the returned metadata is true iff `audio` is present
    /// and non-empty. Two saves sharing a second-resolution stamp never
    /// overwrite each other; the later one gets the next sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::EmptyImage`](crate::error::InvalidInputError)
    /// if the image blob is empty, and a storage error if persistence fails —
    /// a failed save is surfaced, never silently dropped.
    async fn save(
        &self,
        image: Vec<u8>,
        audio: Option<Vec<u8>>,
        stamp: CaptureStamp,
    ) -> Result<CaptureRecord>;

    /// Return all records, newest first (descending by stamp, then seq).
    async fn list_all(&self) -> Result<Vec<CaptureRecord>>;

    /// Derived statistics over the record set.
    ///
    /// `now` is the caller's current time; the "today" count is computed
    /// against it at read time.
    async fn stats(&self, now: NaiveDateTime) -> Result<CaptureStats> {
        let records = self.list_all().await?;
        Ok(CaptureStats::tally(
            records.iter().map(|r| (&r.stamp, &r.meta)),
            now,
        ))
    }
}
