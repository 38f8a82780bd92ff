pub mod backend;
mod error_format;
pub mod executor;
pub mod reply;

pub use backend::RemoteBackend;
pub use executor::{CommandExecutor, RedisExecutor};
pub use reply::Reply;

use kvui_core::{BackendKind, BackendRegistry};

/// Registers the redis driver under [`BackendKind::Redis`].
pub fn register(registry: &mut BackendRegistry) {
    registry.register(BackendKind::Redis, RemoteBackend::open);
}
