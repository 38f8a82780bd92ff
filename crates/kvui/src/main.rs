mod cli;
mod event_loop;
mod keymap;
mod logging;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use kvui_core::BackendRegistry;
use kvui_ui::Browser;
use log::{info, warn};
use terminal::Tui;
use tokio::sync::mpsc;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            eprintln!("kvui: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let log_path = logging::init(cli.log_file.as_deref())?;
    info!(
        "kvui {} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );

    let config = cli.backend_config();
    let backend = backend_registry()
        .open(cli.kind, &config)
        .with_context(|| format!("opening {} backend at {}", cli.kind, config.address()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .thread_name("kvui-worker")
        .build()
        .context("starting runtime")?;

    let mut tui = Tui::init(cli.no256).context("initialising terminal")?;
    let (width, height) = tui.size()?;
    let mut browser = Browser::new(backend, width, height);
    browser.start();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    event_loop::spawn_status_ticker(runtime.handle(), tx.clone());
    event_loop::spawn_input_reader(runtime.handle(), tx, Arc::clone(&stop));

    let result = event_loop::run(&mut browser, &mut rx, |browser| tui.draw(browser));

    stop.store(true, Ordering::Relaxed);
    drop(rx);
    drop(tui);
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    if let Err(error) = browser.shutdown() {
        warn!("closing backend failed: {error}");
    }
    info!("kvui stopped");

    result.context("drawing terminal")
}

fn backend_registry() -> BackendRegistry {
    #[allow(unused_mut)]
    let mut registry = BackendRegistry::new();

    #[cfg(feature = "redis")]
    kvui_driver_redis::register(&mut registry);

    registry
}
