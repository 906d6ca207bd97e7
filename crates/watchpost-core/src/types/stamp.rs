//! Capture timestamp type.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Wire format for capture stamps: second resolution, filesystem safe.
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A second-resolution capture timestamp in `YYYYMMDD_HHMMSS` form.
///
/// The stamp is the display key of a capture record. It is *not* unique on
/// its own: two captures landing in the same second share a stamp and are
/// told apart by the record's sequence number.
///
/// # Example
///
/// ```
/// use watchpost_core::CaptureStamp;
///
/// let stamp = CaptureStamp::new("20240101_120000").unwrap();
/// assert_eq!(stamp.to_string(), "20240101_120000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaptureStamp(NaiveDateTime);

impl CaptureStamp {
    /// Parse a stamp from its `YYYYMMDD_HHMMSS` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not parse as a calendar datetime
    /// in that format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let datetime = NaiveDateTime::parse_from_str(s, STAMP_FORMAT).map_err(|e| {
            InvalidInputError::Stamp {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(datetime))
    }

    /// Create a stamp from a datetime, truncating to second resolution.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Returns the underlying datetime.
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// True if the stamp falls on the given calendar day.
    pub fn is_on_day(&self, day: NaiveDate) -> bool {
        self.0.date() == day
    }
}

impl fmt::Display for CaptureStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

impl FromStr for CaptureStamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CaptureStamp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<CaptureStamp> for String {
    fn from(stamp: CaptureStamp) -> Self {
        stamp.to_string()
    }
}
