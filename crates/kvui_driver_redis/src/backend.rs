use std::sync::{Mutex, MutexGuard};

use kvui_core::{Backend, BackendConfig, BackendKind, KeyType, KvError, Liveness};
use log::info;

use crate::{CommandExecutor, RedisExecutor, Reply};

/// Backend that turns each operation into one command on a
/// [`CommandExecutor`] and decodes the typed reply.
pub struct RemoteBackend {
    executor: Mutex<Box<dyn CommandExecutor>>,
}

impl RemoteBackend {
    pub fn new(executor: Box<dyn CommandExecutor>) -> Self {
        Self {
            executor: Mutex::new(executor),
        }
    }

    /// Dials the store described by `config`.
    pub fn connect(config: &BackendConfig) -> Result<Self, KvError> {
        let executor = RedisExecutor::connect(config)?;
        info!("connected to redis at {}", config.address());
        Ok(Self::new(Box::new(executor)))
    }

    /// Registry constructor.
    pub fn open(config: &BackendConfig) -> Result<Box<dyn Backend>, KvError> {
        Ok(Box::new(Self::connect(config)?))
    }

    fn executor(&self) -> MutexGuard<'_, Box<dyn CommandExecutor>> {
        match self.executor.lock() {
            Ok(guard) => guard,
            Err(poison_error) => poison_error.into_inner(),
        }
    }

    fn execute(&self, command: &str, args: &[&str]) -> Result<Reply, KvError> {
        self.executor().execute(command, args)
    }
}

impl Backend for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }

    fn list_database_count(&self) -> Result<u32, KvError> {
        let Reply::Array(mut values) = self.execute("CONFIG", &["GET", "databases"])? else {
            return Err(KvError::decode("expected array reply to CONFIG GET"));
        };

        if values.len() < 2 {
            return Ok(0);
        }

        let count = values.swap_remove(1).into_int()?;
        u32::try_from(count)
            .map_err(|_| KvError::decode(format!("invalid database count {}", count)))
    }

    fn select_database(&self, index: u32) -> Result<(), KvError> {
        let index = index.to_string();
        self.execute("SELECT", &[index.as_str()])?;
        Ok(())
    }

    fn is_connected(&self) -> Liveness {
        match self.executor().last_error() {
            None => Liveness::Connected,
            Some(error) => Liveness::Disconnected(error),
        }
    }

    fn type_of(&self, key: &str) -> Result<KeyType, KvError> {
        let tag = self
            .execute("TYPE", &[key])?
            .into_string()?
            .ok_or_else(|| KvError::decode("TYPE returned nil"))?;
        KeyType::from_tag(key, &tag)
    }

    fn list_keys(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        self.execute("KEYS", &[pattern])?.into_strings()
    }

    fn get(&self, key: &str) -> Result<String, KvError> {
        self.execute("GET", &[key])?
            .into_string()?
            .ok_or_else(|| KvError::key_not_found(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.execute("SET", &[key, value])?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.execute("DEL", &[key])?;
        Ok(())
    }

    fn hash_field_names(&self, key: &str) -> Result<Vec<String>, KvError> {
        let fields = self.execute("HKEYS", &[key])?.into_strings()?;
        non_empty(key, fields)
    }

    // A nil HGET cannot tell a missing key from a missing field without a
    // second round trip; it is reported as a missing field.
    fn hash_get(&self, key: &str, field: &str) -> Result<String, KvError> {
        self.execute("HGET", &[key, field])?
            .into_string()?
            .ok_or_else(|| KvError::field_not_found(key, field))
    }

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), KvError> {
        self.execute("HSET", &[key, field, value])?;
        Ok(())
    }

    fn hash_delete(&self, key: &str, field: &str) -> Result<(), KvError> {
        self.execute("HDEL", &[key, field])?;
        Ok(())
    }

    fn list_get(&self, key: &str) -> Result<Vec<String>, KvError> {
        let items = self.execute("LRANGE", &[key, "0", "-1"])?.into_strings()?;
        non_empty(key, items)
    }
}

// Redis deletes a hash or list once its last element is gone, so an empty
// HKEYS or LRANGE reply means the key does not exist.
fn non_empty(key: &str, values: Vec<String>) -> Result<Vec<String>, KvError> {
    if values.is_empty() {
        Err(KvError::key_not_found(key))
    } else {
        Ok(values)
    }
}
