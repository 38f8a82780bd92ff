//! Process-local backend.
//!
//! Every key is stored as a field -> value mapping. There is no separate
//! string representation: [`RamBackend::set`] only accepts a JSON object of
//! strings, and [`RamBackend::get`] serialises the stored mapping back to
//! JSON. A plain scalar therefore does not survive a set/get round trip,
//! unlike on the remote backend.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::{Backend, BackendConfig, BackendKind, KeyType, KvError, Liveness};

type Fields = BTreeMap<String, String>;

#[derive(Debug, Default)]
pub struct RamBackend {
    storage: RwLock<BTreeMap<String, Fields>>,
}

impl RamBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry constructor. The RAM backend ignores the remote target.
    pub fn open(_config: &BackendConfig) -> Result<Box<dyn Backend>, KvError> {
        Ok(Box::new(Self::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Fields>> {
        match self.storage.read() {
            Ok(guard) => guard,
            Err(poison_error) => poison_error.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Fields>> {
        match self.storage.write() {
            Ok(guard) => guard,
            Err(poison_error) => poison_error.into_inner(),
        }
    }
}

impl Backend for RamBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Ram
    }

    fn list_database_count(&self) -> Result<u32, KvError> {
        Ok(1)
    }

    fn select_database(&self, _index: u32) -> Result<(), KvError> {
        Ok(())
    }

    fn is_connected(&self) -> Liveness {
        Liveness::Connected
    }

    fn type_of(&self, key: &str) -> Result<KeyType, KvError> {
        if self.read().contains_key(key) {
            Ok(KeyType::Map)
        } else {
            Err(KvError::key_not_found(key))
        }
    }

    fn list_keys(&self, _pattern: &str) -> Result<Vec<String>, KvError> {
        Ok(self.read().keys().cloned().collect())
    }

    fn get(&self, key: &str) -> Result<String, KvError> {
        let storage = self.read();
        let fields = storage
            .get(key)
            .ok_or_else(|| KvError::key_not_found(key))?;
        Ok(serde_json::to_string(fields)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut storage = self.write();
        storage.entry(key.to_string()).or_default();

        match serde_json::from_str::<Fields>(value) {
            Ok(fields) => {
                storage.insert(key.to_string(), fields);
                Ok(())
            }
            Err(error) => {
                debug!("ram set {key}: value is not a string mapping ({error})");
                Err(error.into())
            }
        }
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.write().remove(key);
        Ok(())
    }

    fn hash_field_names(&self, key: &str) -> Result<Vec<String>, KvError> {
        let storage = self.read();
        let fields = storage
            .get(key)
            .ok_or_else(|| KvError::key_not_found(key))?;
        Ok(fields.keys().cloned().collect())
    }

    fn hash_get(&self, key: &str, field: &str) -> Result<String, KvError> {
        let storage = self.read();
        let fields = storage
            .get(key)
            .ok_or_else(|| KvError::key_not_found(key))?;
        fields
            .get(field)
            .cloned()
            .ok_or_else(|| KvError::field_not_found(key, field))
    }

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), KvError> {
        self.write()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    fn hash_delete(&self, key: &str, field: &str) -> Result<(), KvError> {
        if let Some(fields) = self.write().get_mut(key) {
            fields.remove(field);
        }
        Ok(())
    }

    fn list_get(&self, key: &str) -> Result<Vec<String>, KvError> {
        if self.read().contains_key(key) {
            Err(KvError::NotSupported(
                "the RAM backend has no list values".to_string(),
            ))
        } else {
            Err(KvError::key_not_found(key))
        }
    }
}
