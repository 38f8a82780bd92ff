use kvui_core::{BackendConfig, KvError};
use std::time::{Duration, Instant};
use testcontainers::GenericImage;
use testcontainers::clients::Cli;
use testcontainers::core::WaitFor;

/// Runs `run` against a throwaway redis container.
pub fn with_redis<T, E, F>(run: F) -> Result<T, E>
where
    F: FnOnce(BackendConfig) -> Result<T, E>,
{
    let docker = Cli::default();
    let image = GenericImage::new("redis", "7")
        .with_exposed_port(6379)
        .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"));

    let container = docker.run(image);
    let port = container.get_host_port_ipv4(6379);

    run(BackendConfig::new("127.0.0.1", port))
}

pub fn retry_operation<T, F>(timeout: Duration, mut operation: F) -> Result<T, KvError>
where
    F: FnMut() -> Result<T, KvError>,
{
    let deadline = Instant::now() + timeout;

    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(error) => {
                if Instant::now() >= deadline {
                    return Err(error);
                }
            }
        }

        std::thread::sleep(Duration::from_millis(250));
    }
}
