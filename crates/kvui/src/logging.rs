use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;

const LOG_FILE_NAME: &str = "kvui.log";

/// The terminal owns stdout and stderr while the browser runs, so logs go to
/// a file: `requested`, or `kvui.log` in the user cache directory.
pub fn init(requested: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = match requested {
        Some(path) => path.to_path_buf(),
        None => default_log_path(),
    };

    let file = open_log_file(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(path)
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("kvui"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_log_file_name() {
        assert!(default_log_path().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn log_file_and_parents_are_created() {
        let dir = std::env::temp_dir().join(format!("kvui-log-test-{}", std::process::id()));
        let path = dir.join("nested").join("test.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
