use kvui_core::{BackendConfig, KvError};
use log::{debug, warn};

use crate::Reply;
use crate::error_format::{describe_connect_error, describe_query_error, is_connection_failure};

/// Opaque command channel to the backing store.
///
/// One call is one round trip. Implementations remember the last
/// connection-level failure so liveness can be reported without probing.
pub trait CommandExecutor: Send {
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<Reply, KvError>;

    /// Sticky connection error, if the connection has ever failed.
    fn last_error(&self) -> Option<KvError>;
}

/// Executor backed by a blocking `redis` connection.
pub struct RedisExecutor {
    connection: redis::Connection,
    last_error: Option<KvError>,
}

impl RedisExecutor {
    pub fn connect(config: &BackendConfig) -> Result<Self, KvError> {
        let uri = format!("redis://{}:{}/", config.host, config.port);
        let client = redis::Client::open(uri.as_str())
            .map_err(|e| describe_connect_error(&e, &config.host, config.port))?;
        let connection = client
            .get_connection()
            .map_err(|e| describe_connect_error(&e, &config.host, config.port))?;

        Ok(Self {
            connection,
            last_error: None,
        })
    }
}

impl CommandExecutor for RedisExecutor {
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<Reply, KvError> {
        let mut cmd = redis::cmd(command);
        for arg in args {
            cmd.arg(*arg);
        }

        debug!("redis: {} {}", command, args.join(" "));

        match cmd.query::<redis::Value>(&mut self.connection) {
            Ok(value) => Ok(Reply::from(value)),
            Err(error) => {
                let described = describe_query_error(&error);
                if is_connection_failure(&error) {
                    warn!("redis connection failed: {}", described);
                    self.last_error = Some(described.clone());
                }
                Err(described)
            }
        }
    }

    fn last_error(&self) -> Option<KvError> {
        self.last_error.clone()
    }
}
