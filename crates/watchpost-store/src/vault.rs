//! Filesystem-backed capture record vault.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use watchpost_core::capture::{
    parse_record_key, record_key, CaptureMeta, CaptureRecord, CaptureStats,
};
use watchpost_core::error::{Error, InvalidInputError, StorageError};
use watchpost_core::types::CaptureStamp;
use watchpost_core::{CaptureVault, Result};

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

/// Record identity and metadata as persisted in each record's `meta.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMeta {
    stamp: CaptureStamp,
    seq: u32,
    #[serde(flatten)]
    meta: CaptureMeta,
}

/// Capture vault persisting one directory per record.
///
/// Layout under the root:
///
/// ```text
/// captures/
///   20240101_120000/        image.bin, audio.bin?, meta.json
///   20240101_120000-1/      a second capture within the same second
/// captures.lock
/// ```
///
/// A record is staged in a hidden temp directory and published with a single
/// rename, so listings never observe a partially written record. The save
/// path runs under an exclusive advisory lock on `captures.lock`, which is
/// how two same-second saves end up with distinct sequence numbers instead
/// of overwriting each other.
#[derive(Debug, Clone)]
pub struct FileVault {
    root: PathBuf,
}

impl FileVault {
    /// Create a vault rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn captures_dir(&self) -> PathBuf {
        self.root.join("captures")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("captures.lock")
    }

    /// Keys of all published records, unsorted.
    fn record_keys(&self) -> Result<Vec<(CaptureStamp, u32)>> {
        let dir = self.captures_dir();

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir).map_err(map_read)? {
            let entry = entry.map_err(map_read)?;
            if let Some(key) = entry.file_name().to_str().and_then(parse_record_key) {
                keys.push(key);
            }
        }

        Ok(keys)
    }

    /// Next free sequence number for a stamp.
    fn next_seq(&self, stamp: CaptureStamp) -> Result<u32> {
        Ok(self
            .record_keys()?
            .into_iter()
            .filter(|(s, _)| *s == stamp)
            .map(|(_, seq)| seq + 1)
            .max()
            .unwrap_or(0))
    }

    fn read_record(&self, stamp: CaptureStamp, seq: u32) -> Result<CaptureRecord> {
        let dir = self.captures_dir().join(record_key(stamp, seq));

        let content = fs::read_to_string(dir.join("meta.json")).map_err(map_read)?;
        let stored: StoredMeta = serde_json::from_str(&content).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: format!("{}: {}", dir.display(), e),
            })
        })?;

        let image = fs::read(dir.join("image.bin")).map_err(map_read)?;
        let audio = if stored.meta.has_audio {
            Some(fs::read(dir.join("audio.bin")).map_err(map_read)?)
        } else {
            None
        };

        Ok(CaptureRecord {
            stamp: stored.stamp,
            seq: stored.seq,
            image,
            audio,
            meta: stored.meta,
        })
    }
}

#[async_trait]
impl CaptureVault for FileVault {
    #[instrument(skip(self, image, audio), fields(%stamp))]
    async fn save(
        &self,
        image: Vec<u8>,
        audio: Option<Vec<u8>>,
        stamp: CaptureStamp,
    ) -> Result<CaptureRecord> {
        if image.is_empty() {
            return Err(InvalidInputError::EmptyImage.into());
        }

        // Absent and empty audio are the same thing: no recording.
        let audio = audio.filter(|a| !a.is_empty());

        fs::create_dir_all(self.captures_dir()).map_err(map_write)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_write)?;
        lock_file.lock_exclusive().map_err(map_write)?;

        let result = self.save_locked(image, audio, stamp);

        let _ = FileExt::unlock(&lock_file);

        let record = result?;
        debug!(key = %record.key(), has_audio = record.meta.has_audio, "Saved capture record");

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<CaptureRecord>> {
        let mut keys = self.record_keys()?;
        // Reverse chronological display order is a contract, not an accident
        // of directory iteration.
        keys.sort_by(|a, b| b.cmp(a));

        let mut records = Vec::with_capacity(keys.len());
        for (stamp, seq) in keys {
            records.push(self.read_record(stamp, seq)?);
        }

        Ok(records)
    }

    async fn stats(&self, now: NaiveDateTime) -> Result<CaptureStats> {
        // Metadata is enough; skip the blobs.
        let mut entries = Vec::new();
        for (stamp, seq) in self.record_keys()? {
            let path = self
                .captures_dir()
                .join(record_key(stamp, seq))
                .join("meta.json");
            let content = fs::read_to_string(&path).map_err(map_read)?;
            let stored: StoredMeta = serde_json::from_str(&content).map_err(|e| {
                Error::Storage(StorageError::Corrupt {
                    message: format!("{}: {}", path.display(), e),
                })
            })?;
            entries.push((stored.stamp, stored.meta));
        }

        Ok(CaptureStats::tally(
            entries.iter().map(|(stamp, meta)| (stamp, meta)),
            now,
        ))
    }
}

impl FileVault {
    fn save_locked(
        &self,
        image: Vec<u8>,
        audio: Option<Vec<u8>>,
        stamp: CaptureStamp,
    ) -> Result<CaptureRecord> {
        let seq = self.next_seq(stamp)?;
        let key = record_key(stamp, seq);

        let final_dir = self.captures_dir().join(&key);
        let temp_dir = self.captures_dir().join(format!(".{}.tmp", key));

        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).map_err(map_write)?;
        }
        fs::create_dir_all(&temp_dir).map_err(map_write)?;

        let meta = CaptureMeta {
            has_audio: audio.is_some(),
            image_bytes: image.len() as u64,
            audio_bytes: audio.as_ref().map(|a| a.len() as u64).unwrap_or(0),
        };

        fs::write(temp_dir.join("image.bin"), &image).map_err(map_write)?;
        if let Some(ref audio) = audio {
            fs::write(temp_dir.join("audio.bin"), audio).map_err(map_write)?;
        }

        let stored = StoredMeta {
            stamp,
            seq,
            meta: meta.clone(),
        };
        let content = serde_json::to_string_pretty(&stored).map_err(|e| {
            Error::Storage(StorageError::Write {
                message: e.to_string(),
            })
        })?;
        fs::write(temp_dir.join("meta.json"), content).map_err(map_write)?;

        // Publish the record in one step.
        fs::rename(&temp_dir, &final_dir).map_err(map_write)?;

        Ok(CaptureRecord {
            stamp,
            seq,
            image,
            audio,
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stamp(s: &str) -> CaptureStamp {
        CaptureStamp::new(s).unwrap()
    }

    #[tokio::test]
    async fn save_and_list_round_trips_image_bytes() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        let image = b"\x89PNG\r\n\x1a\n fake png".to_vec();
        vault
            .save(image.clone(), None, stamp("20240101_120000"))
            .await
            .unwrap();

        let records = vault.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].image, image);
        assert!(!records[0].meta.has_audio);
        assert_eq!(records[0].audio, None);
    }

    #[tokio::test]
    async fn has_audio_tracks_non_empty_audio_only() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        let with = vault
            .save(b"img".to_vec(), Some(b"wav".to_vec()), stamp("20240101_120000"))
            .await
            .unwrap();
        assert!(with.meta.has_audio);
        assert_eq!(with.meta.audio_bytes, 3);

        let empty = vault
            .save(b"img".to_vec(), Some(Vec::new()), stamp("20240101_120001"))
            .await
            .unwrap();
        assert!(!empty.meta.has_audio);
        assert_eq!(empty.audio, None);
    }

    #[tokio::test]
    async fn same_second_saves_get_distinct_seq() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());
        let at = stamp("20240101_120000");

        let first = vault.save(b"one".to_vec(), None, at).await.unwrap();
        let second = vault.save(b"two".to_vec(), None, at).await.unwrap();
        let third = vault.save(b"three".to_vec(), None, at).await.unwrap();

        assert_eq!((first.seq, second.seq, third.seq), (0, 1, 2));
        assert_eq!(first.key(), "20240101_120000");
        assert_eq!(second.key(), "20240101_120000-1");

        // Nothing was overwritten.
        let records = vault.list_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].image, b"three");
        assert_eq!(records[2].image, b"one");
    }

    #[tokio::test]
    async fn list_is_reverse_chronological() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        vault
            .save(b"old".to_vec(), None, stamp("20240101_080000"))
            .await
            .unwrap();
        vault
            .save(b"new".to_vec(), None, stamp("20240102_090000"))
            .await
            .unwrap();
        vault
            .save(b"mid".to_vec(), None, stamp("20240101_210000"))
            .await
            .unwrap();

        let records = vault.list_all().await.unwrap();
        let order: Vec<_> = records.iter().map(|r| r.key()).collect();
        assert_eq!(
            order,
            vec!["20240102_090000", "20240101_210000", "20240101_080000"]
        );
    }

    #[tokio::test]
    async fn empty_image_is_rejected() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        let err = vault
            .save(Vec::new(), None, stamp("20240101_120000"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::EmptyImage)
        ));
        assert!(vault.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_count_total_audio_and_today() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        vault
            .save(b"a".to_vec(), Some(b"wav".to_vec()), stamp("20240101_090000"))
            .await
            .unwrap();
        vault
            .save(b"b".to_vec(), None, stamp("20240101_100000"))
            .await
            .unwrap();
        vault
            .save(b"c".to_vec(), None, stamp("20231230_100000"))
            .await
            .unwrap();

        let now = stamp("20240101_200000").datetime();
        let stats = vault.stats(now).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_audio, 1);
        assert_eq!(stats.today, 2);

        // Same records, different caller day.
        let later = stamp("20240102_080000").datetime();
        assert_eq!(vault.stats(later).await.unwrap().today, 0);
    }

    #[tokio::test]
    async fn foreign_directory_entries_are_ignored() {
        let dir = TempDir::new().unwrap();
        let vault = FileVault::new(dir.path());

        vault
            .save(b"img".to_vec(), None, stamp("20240101_120000"))
            .await
            .unwrap();
        fs::create_dir_all(dir.path().join("captures").join("scratch")).unwrap();

        assert_eq!(vault.list_all().await.unwrap().len(), 1);
    }
}
