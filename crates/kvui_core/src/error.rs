use thiserror::Error;

use crate::BackendKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KvError {
    #[error("key {key} not found")]
    KeyNotFound { key: String },

    #[error("field {field} not found")]
    FieldNotFound { key: String, field: String },

    #[error("invalid type: {0}")]
    UnrecognizedType(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Unexpected reply: {0}")]
    Decode(String),

    #[error("Command failed: {0}")]
    Server(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("invalid KV-storage: {0}")]
    UnknownBackend(String),

    #[error("No backend registered for {0}")]
    BackendUnavailable(BackendKind),

    #[error("IO error: {0}")]
    Io(String),
}

impl KvError {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn field_not_found(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            key: key.into(),
            field: field.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// True for both missing keys and missing hash fields.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::FieldNotFound { .. })
    }
}

impl From<std::io::Error> for KvError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for KvError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_store_wording() {
        assert_eq!(KvError::key_not_found("value").to_string(), "key value not found");
        assert_eq!(
            KvError::field_not_found("value", "name").to_string(),
            "field name not found"
        );
        assert_eq!(
            KvError::UnrecognizedType("zset".to_string()).to_string(),
            "invalid type: zset"
        );
    }

    #[test]
    fn classification() {
        assert!(KvError::key_not_found("a").is_not_found());
        assert!(KvError::field_not_found("a", "b").is_not_found());
        assert!(!KvError::decode("x").is_not_found());
    }
}
