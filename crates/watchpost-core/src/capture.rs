//! Capture record data model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::CaptureStamp;

/// Derived metadata for one capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureMeta {
    /// True iff a non-empty audio blob was supplied at save time.
    pub has_audio: bool,
    /// Size of the image blob in bytes.
    pub image_bytes: u64,
    /// Size of the audio blob in bytes (0 when absent).
    pub audio_bytes: u64,
}

/// One immutable capture: image, optional audio, derived metadata.
///
/// Records are identified by `(stamp, seq)`. The sequence number exists only
/// to tell apart captures landing within the same second; the first capture
/// for a stamp has `seq == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    /// Second-resolution creation time, used as the display key.
    pub stamp: CaptureStamp,
    /// Disambiguator among records sharing a stamp.
    pub seq: u32,
    /// The captured image, encoding opaque to the core.
    pub image: Vec<u8>,
    /// The captured audio, if any was recorded.
    pub audio: Option<Vec<u8>>,
    /// Derived metadata.
    pub meta: CaptureMeta,
}

impl CaptureRecord {
    /// The record's unique key: the stamp alone for `seq == 0`, otherwise
    /// `<stamp>-<seq>`.
    pub fn key(&self) -> String {
        record_key(self.stamp, self.seq)
    }
}

/// Render a `(stamp, seq)` identity as a key string.
pub fn record_key(stamp: CaptureStamp, seq: u32) -> String {
    if seq == 0 {
        stamp.to_string()
    } else {
        format!("{}-{}", stamp, seq)
    }
}

/// Parse a record key back into its `(stamp, seq)` identity.
///
/// Returns `None` for names that are not record keys, so directory listings
/// can skip foreign entries.
pub fn parse_record_key(name: &str) -> Option<(CaptureStamp, u32)> {
    match name.split_once('-') {
        None => CaptureStamp::new(name).ok().map(|stamp| (stamp, 0)),
        Some((stamp, seq)) => {
            let stamp = CaptureStamp::new(stamp).ok()?;
            let seq: u32 = seq.parse().ok()?;
            (seq > 0).then_some((stamp, seq))
        }
    }
}

/// Derived dashboard statistics over the whole record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureStats {
    /// Total number of records.
    pub total: u64,
    /// Records that carry audio.
    pub with_audio: u64,
    /// Records whose stamp falls on the caller's current calendar day.
    pub today: u64,
}

impl CaptureStats {
    /// Compute statistics from record identities and metadata.
    ///
    /// `now` is the caller's current time; the day boundary is evaluated
    /// against it at read time, not stored at write time.
    pub fn tally<'a, I>(records: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = (&'a CaptureStamp, &'a CaptureMeta)>,
    {
        let today = now.date();
        let mut stats = CaptureStats {
            total: 0,
            with_audio: 0,
            today: 0,
        };

        for (stamp, meta) in records {
            stats.total += 1;
            if meta.has_audio {
                stats.with_audio += 1;
            }
            if stamp.is_on_day(today) {
                stats.today += 1;
            }
        }

        stats
    }
}
