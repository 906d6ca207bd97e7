//! Capture-link token id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::{Error, InvalidInputError};

/// An opaque, unguessable capture-link token id.
///
/// Freshly issued ids are 32 lowercase hex characters derived from a random
/// UUID, which gives enough entropy to resist enumeration. The type also
/// accepts externally supplied ids (e.g. typed into the CLI) as long as they
/// fit the allowed character set.
///
/// # Example
///
/// ```
/// use watchpost_core::TokenId;
///
/// let id = TokenId::generate();
/// assert_eq!(id.as_str().len(), 32);
///
/// let parsed = TokenId::new(id.as_str()).unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    /// Generate a fresh random token id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Create a token id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, too long, or contains
    /// characters outside `[A-Za-z0-9._~-]`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the token id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::TokenId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.len() > 64 {
            return Err(InvalidInputError::TokenId {
                value: s.to_string(),
                reason: "exceeds maximum length of 64 characters".to_string(),
            }
            .into());
        }

        for c in s.chars() {
            if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' && c != '~' {
                return Err(InvalidInputError::TokenId {
                    value: s.to_string(),
                    reason: format!("contains invalid character '{}'", c),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TokenId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl AsRef<str> for TokenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TokenId::generate();
        let b = TokenId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn valid_external_id() {
        let id = TokenId::new("tok-1").unwrap();
        assert_eq!(id.as_str(), "tok-1");
    }

    #[test]
    fn invalid_empty() {
        assert!(TokenId::new("").is_err());
    }

    #[test]
    fn invalid_character() {
        assert!(TokenId::new("tok/1").is_err());
    }

    #[test]
    fn invalid_too_long() {
        assert!(TokenId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = TokenId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
