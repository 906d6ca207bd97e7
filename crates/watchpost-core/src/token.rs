//! Capture-link token data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TokenId;

/// How many captures a link authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// The link is used up by its first successful capture.
    Single,
    /// The link stays valid until the admin revokes it.
    Multiple,
}

/// A live capture link as seen by the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureLink {
    /// The opaque token id embedded in the shared URL.
    pub id: TokenId,
    /// Single-use or reusable.
    pub mode: LinkMode,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

/// Outcome of presenting a token for consumption.
///
/// `Invalid` covers both unknown ids and already-consumed single-use tokens;
/// the two cases are deliberately indistinguishable to the link-holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeResult {
    /// The token authorizes a capture. For a `Single` token, this caller is
    /// the only one that will ever see it.
    Valid,
    /// The token is unknown, revoked, or used up.
    Invalid,
}

impl ConsumeResult {
    /// True if the token authorized a capture.
    pub fn is_valid(&self) -> bool {
        matches!(self, ConsumeResult::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LinkMode::Single).unwrap(), "\"single\"");
        assert_eq!(
            serde_json::to_string(&LinkMode::Multiple).unwrap(),
            "\"multiple\""
        );
    }

    #[test]
    fn consume_result_predicate() {
        assert!(ConsumeResult::Valid.is_valid());
        assert!(!ConsumeResult::Invalid.is_valid());
    }
}
