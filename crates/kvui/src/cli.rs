use std::path::PathBuf;

use clap::{ArgAction, Parser};
use kvui_core::{BackendConfig, BackendKind, DEFAULT_HOST, DEFAULT_PORT};

/// Terminal browser for key-value stores.
#[derive(Debug, Parser)]
#[command(name = "kvui", version, about, disable_help_flag = true)]
pub struct Cli {
    /// KV-storage type
    #[arg(long = "type", value_name = "TYPE", default_value = "redis")]
    pub kind: BackendKind,

    /// Host to connect to
    #[arg(short = 'h', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to connect to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Disable 256-color
    #[arg(long = "no256")]
    pub no256: bool,

    /// Write logs here instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print help
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.host.clone(), self.port)
    }
}
