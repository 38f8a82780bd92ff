use kvui_core::{Backend, RamBackend};
use kvui_driver_redis::Reply;

/// `CONFIG GET databases` reply announcing `count` databases.
pub fn databases_reply(count: u32) -> Reply {
    Reply::bulk_array(["databases".to_string(), count.to_string()])
}

pub fn type_reply(tag: &str) -> Reply {
    Reply::status(tag)
}

pub fn keys_reply(keys: &[&str]) -> Reply {
    Reply::bulk_array(keys.iter().copied())
}

/// RAM backend holding two hash keys: `user:1` {name, role} and `config` {}.
pub fn seeded_ram() -> RamBackend {
    let ram = RamBackend::new();
    let _ = ram.hash_set("user:1", "name", "alice");
    let _ = ram.hash_set("user:1", "role", "admin");
    let _ = ram.set("config", "{}");
    ram
}
