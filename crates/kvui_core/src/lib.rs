mod backend;
mod config;
mod error;
mod key_type;
mod ram;
mod registry;

pub use backend::Backend;
pub use config::{BackendConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::KvError;
pub use key_type::{KeyType, Liveness};
pub use ram::RamBackend;
pub use registry::{BackendConstructor, BackendKind, BackendRegistry};
