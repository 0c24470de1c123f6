//! Voter identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque voter token, typically an externally issued account address.
///
/// The ballot only relies on equality and hashing; no structure is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let id = Identity::from("0xabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabc\"");

        let back: Identity = serde_json::from_str("\"0xabc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_identity_is_empty() {
        assert!(Identity::from("   ").is_empty());
        assert!(!Identity::from("voter").is_empty());
    }
}
