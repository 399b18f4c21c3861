//! Store keys
//!
//! A store key is generated when a tag group record is first inserted. Keys
//! are random UUIDs and treated as *almost* unique: loads always verify the
//! owning node and tag group ids of whatever the key matches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque identifier of a stored tag group record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreKey(Uuid);

impl StoreKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The key as stored in documents.
    pub fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }

    /// Reads a key from a document value.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(StoreKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(StoreKey::generate(), StoreKey::generate());
    }

    #[test]
    fn test_value_roundtrip() {
        let key = StoreKey::generate();
        let value = key.to_value();
        assert!(value.is_string());
        assert_eq!(StoreKey::from_value(&value), Some(key));
    }

    #[test]
    fn test_parse() {
        let key: StoreKey = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(key.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!("not-a-key".parse::<StoreKey>().is_err());
        assert_eq!(StoreKey::from_value(&Value::from(12)), None);
    }
}
