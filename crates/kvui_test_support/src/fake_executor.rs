use kvui_core::KvError;
use kvui_driver_redis::{CommandExecutor, RemoteBackend, Reply};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Reply(Reply),
    Error(KvError),
}

#[derive(Default)]
struct FakeExecutorState {
    outcomes: RwLock<HashMap<String, FakeOutcome>>,
    executed: Mutex<Vec<String>>,
    sticky_error: RwLock<Option<KvError>>,
}

/// Scripted command executor.
///
/// Outcomes are looked up by the full command line (`"TYPE user:1"`) first,
/// then by the command name alone (`"TYPE"`); anything unscripted replies
/// `Nil`. Clones share state, so a test can keep
/// a handle after boxing one into a backend.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<FakeExecutorState>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, command: impl Into<String>, reply: Reply) -> Self {
        self.set_reply(command, reply);
        self
    }

    pub fn with_error(self, command: impl Into<String>, error: KvError) -> Self {
        rwlock_write(&self.state.outcomes).insert(command.into(), FakeOutcome::Error(error));
        self
    }

    /// Marks the connection as broken: every command fails and the error
    /// becomes sticky.
    pub fn with_connection_error(self, message: impl Into<String>) -> Self {
        self.disconnect(message);
        self
    }

    pub fn set_reply(&self, command: impl Into<String>, reply: Reply) {
        rwlock_write(&self.state.outcomes).insert(command.into(), FakeOutcome::Reply(reply));
    }

    pub fn disconnect(&self, message: impl Into<String>) {
        *rwlock_write(&self.state.sticky_error) = Some(KvError::connection(message));
    }

    /// Every command line executed so far, in order.
    pub fn commands(&self) -> Vec<String> {
        mutex_lock(&self.state.executed).clone()
    }

    pub fn clear_commands(&self) {
        mutex_lock(&self.state.executed).clear();
    }

    pub fn remote_backend(&self) -> RemoteBackend {
        RemoteBackend::new(Box::new(self.clone()))
    }

    fn outcome_for(&self, line: &str, command: &str) -> FakeOutcome {
        let outcomes = rwlock_read(&self.state.outcomes);
        outcomes
            .get(line)
            .or_else(|| outcomes.get(command))
            .cloned()
            .unwrap_or(FakeOutcome::Reply(Reply::Nil))
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<Reply, KvError> {
        let line = if args.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", command, args.join(" "))
        };
        mutex_lock(&self.state.executed).push(line.clone());

        if let Some(error) = rwlock_read(&self.state.sticky_error).clone() {
            return Err(error);
        }

        match self.outcome_for(&line, command) {
            FakeOutcome::Reply(reply) => Ok(reply),
            FakeOutcome::Error(error) => Err(error),
        }
    }

    fn last_error(&self) -> Option<KvError> {
        rwlock_read(&self.state.sticky_error).clone()
    }
}

fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_line_wins_over_command_name() {
        let mut fake = FakeExecutor::new()
            .with_reply("TYPE", Reply::status("string"))
            .with_reply("TYPE user", Reply::status("hash"));

        assert_eq!(fake.execute("TYPE", &["user"]), Ok(Reply::status("hash")));
        assert_eq!(fake.execute("TYPE", &["other"]), Ok(Reply::status("string")));
        assert_eq!(fake.execute("GET", &["x"]), Ok(Reply::Nil));
        assert_eq!(fake.commands(), vec!["TYPE user", "TYPE other", "GET x"]);
    }

    #[test]
    fn connection_error_is_sticky() {
        let mut fake = FakeExecutor::new().with_connection_error("refused");
        assert!(fake.execute("PING", &[]).is_err());
        assert_eq!(fake.last_error(), Some(KvError::connection("refused")));
    }
}
