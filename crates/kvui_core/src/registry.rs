use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{Backend, BackendConfig, KvError, RamBackend};

/// Closed set of storage backends the browser can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Redis,
    Ram,
}

impl BackendKind {
    pub const ALL: &'static [BackendKind] = &[BackendKind::Redis, BackendKind::Ram];

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Redis => "redis",
            BackendKind::Ram => "ram",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| KvError::UnknownBackend(s.to_string()))
    }
}

pub type BackendConstructor = fn(&BackendConfig) -> Result<Box<dyn Backend>, KvError>;

/// Maps each [`BackendKind`] to the function that opens it.
///
/// Driver crates register themselves at startup; the RAM backend is always
/// available.
pub struct BackendRegistry {
    constructors: HashMap<BackendKind, BackendConstructor>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            constructors: HashMap::new(),
        };
        registry.register(BackendKind::Ram, RamBackend::open);
        registry
    }

    pub fn register(&mut self, kind: BackendKind, constructor: BackendConstructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn is_registered(&self, kind: BackendKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    pub fn open(
        &self,
        kind: BackendKind,
        config: &BackendConfig,
    ) -> Result<Box<dyn Backend>, KvError> {
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or(KvError::BackendUnavailable(kind))?;

        info!("opening {} backend ({})", kind, config.address());
        constructor(config)
    }

    /// Parses `name` and opens the matching backend.
    pub fn open_named(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<Box<dyn Backend>, KvError> {
        self.open(name.parse()?, config)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
