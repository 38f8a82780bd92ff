use serde::{Deserialize, Serialize};
use std::fmt;

use crate::KvError;

/// Shape of a key's value as far as navigation is concerned.
///
/// `Invalid` stands for "no usable type": the key is gone, nothing is
/// selected, or the store reported a tag this browser cannot show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyType {
    String,
    Map,
    List,
    #[default]
    Invalid,
}

impl KeyType {
    /// Maps a store-native type tag (`TYPE` reply) onto a `KeyType`.
    ///
    /// `none` means the key does not exist.
    pub fn from_tag(key: &str, tag: &str) -> Result<Self, KvError> {
        match tag {
            "hash" => Ok(KeyType::Map),
            "string" => Ok(KeyType::String),
            "list" => Ok(KeyType::List),
            "none" => Err(KvError::key_not_found(key)),
            other => Err(KvError::UnrecognizedType(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Map => "map",
            KeyType::List => "list",
            KeyType::Invalid => "<invalid>",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a backend liveness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    Connected,
    Disconnected(KvError),
}

impl Liveness {
    pub fn is_connected(&self) -> bool {
        matches!(self, Liveness::Connected)
    }

    pub fn error(&self) -> Option<&KvError> {
        match self {
            Liveness::Connected => None,
            Liveness::Disconnected(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_tags_map_to_types() {
        assert_eq!(KeyType::from_tag("k", "hash"), Ok(KeyType::Map));
        assert_eq!(KeyType::from_tag("k", "string"), Ok(KeyType::String));
        assert_eq!(KeyType::from_tag("k", "list"), Ok(KeyType::List));
    }

    #[test]
    fn none_tag_is_missing_key() {
        assert_eq!(
            KeyType::from_tag("ghost", "none"),
            Err(KvError::key_not_found("ghost"))
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            KeyType::from_tag("k", "zset"),
            Err(KvError::UnrecognizedType("zset".to_string()))
        );
    }

    #[test]
    fn labels() {
        assert_eq!(KeyType::Map.to_string(), "map");
        assert_eq!(KeyType::Invalid.to_string(), "<invalid>");
        assert_eq!(KeyType::default(), KeyType::Invalid);
    }
}
