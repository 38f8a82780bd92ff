use crate::{BackendKind, KeyType, KvError, Liveness};

/// Uniform navigation surface over a key-value store.
///
/// The UI talks to the store exclusively through this trait. Implementations
/// must be thread-safe (`Send + Sync`); the RAM backend in particular can be
/// shared with other in-process writers.
///
/// No implementation retries. Every failure reaches the caller as a
/// [`KvError`], translated but otherwise unmodified.
pub trait Backend: Send + Sync {
    /// Which registered kind produced this backend.
    fn kind(&self) -> BackendKind;

    /// Number of selectable databases.
    fn list_database_count(&self) -> Result<u32, KvError>;

    /// Switches the database used by every subsequent call.
    fn select_database(&self, index: u32) -> Result<(), KvError>;

    /// Liveness as last observed by the backend, with the failure reason
    /// when disconnected.
    fn is_connected(&self) -> Liveness;

    /// Current type of `key`.
    ///
    /// A missing key fails with [`KvError::KeyNotFound`]; a native type tag
    /// outside [`KeyType`] fails with [`KvError::UnrecognizedType`]. Callers
    /// treat either failure as [`KeyType::Invalid`].
    fn type_of(&self, key: &str) -> Result<KeyType, KvError>;

    /// Keys matching `pattern`. Backends without native matching return all
    /// keys. An empty store yields an empty list, never an error.
    fn list_keys(&self, pattern: &str) -> Result<Vec<String>, KvError>;

    fn get(&self, key: &str) -> Result<String, KvError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    fn delete(&self, key: &str) -> Result<(), KvError>;

    fn hash_field_names(&self, key: &str) -> Result<Vec<String>, KvError>;

    fn hash_get(&self, key: &str, field: &str) -> Result<String, KvError>;

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), KvError>;

    fn hash_delete(&self, key: &str, field: &str) -> Result<(), KvError>;

    /// Every element of a list-typed key, head first.
    fn list_get(&self, key: &str) -> Result<Vec<String>, KvError>;

    /// Release the underlying connection. Called once at shutdown.
    fn close(&self) -> Result<(), KvError> {
        Ok(())
    }
}
