use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event};
use kvui_ui::{Browser, Flow, InputEvent};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::keymap;

const STATUS_INTERVAL: Duration = Duration::from_secs(1);
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Everything the control loop reacts to. Producers only enqueue; the main
/// thread is the sole consumer and the only code touching the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Input(InputEvent),
    StatusTick,
    Resize(u16, u16),
}

/// Requests a status redraw once a second until the receiver is gone.
pub fn spawn_status_ticker(handle: &Handle, tx: UnboundedSender<AppMessage>) -> JoinHandle<()> {
    handle.spawn(async move {
        let mut interval = tokio::time::interval(STATUS_INTERVAL);
        interval.tick().await;

        loop {
            interval.tick().await;
            if tx.send(AppMessage::StatusTick).is_err() {
                break;
            }
        }
    })
}

/// Forwards key presses and resizes from the terminal until `stop` is set.
pub fn spawn_input_reader(
    handle: &Handle,
    tx: UnboundedSender<AppMessage>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    handle.spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match next_message() {
                Ok(Some(message)) => {
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    log::warn!("terminal input failed: {error}");
                    break;
                }
            }
        }
        log::debug!("input reader stopped");
    })
}

fn next_message() -> io::Result<Option<AppMessage>> {
    if !event::poll(INPUT_POLL)? {
        return Ok(None);
    }

    let message = match event::read()? {
        Event::Key(key) => keymap::input_event(&key).map(AppMessage::Input),
        Event::Resize(width, height) => Some(AppMessage::Resize(width, height)),
        _ => None,
    };
    Ok(message)
}

pub fn apply(browser: &mut Browser, message: AppMessage) -> Flow {
    match message {
        AppMessage::Input(event) => browser.handle(event),
        AppMessage::StatusTick => {
            browser.refresh_status();
            Flow::Continue
        }
        AppMessage::Resize(width, height) => {
            browser.resize(width, height);
            Flow::Continue
        }
    }
}

/// Drains `rx` on the calling thread, redrawing after every message, until a
/// quit event arrives or every sender is dropped. Must not be called from
/// inside the runtime.
pub fn run<D>(
    browser: &mut Browser,
    rx: &mut UnboundedReceiver<AppMessage>,
    mut draw: D,
) -> io::Result<()>
where
    D: FnMut(&Browser) -> io::Result<()>,
{
    draw(browser)?;

    while let Some(message) = rx.blocking_recv() {
        if apply(browser, message) == Flow::Quit {
            log::info!("quit requested");
            break;
        }
        draw(browser)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvui_test_support::fixtures::seeded_ram;
    use kvui_ui::{Pane, PaneId};
    use tokio::sync::mpsc;

    fn browser() -> Browser {
        let mut browser = Browser::new(Box::new(seeded_ram()), 80, 24);
        browser.start();
        browser
    }

    #[test]
    fn loop_applies_messages_in_order_and_stops_on_quit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(AppMessage::Input(InputEvent::CursorDown)).unwrap();
        tx.send(AppMessage::StatusTick).unwrap();
        tx.send(AppMessage::Input(InputEvent::Quit)).unwrap();
        tx.send(AppMessage::Input(InputEvent::CursorDown)).unwrap();

        let mut browser = browser();
        let mut draws = 0;
        run(&mut browser, &mut rx, |_| {
            draws += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(browser.state().key(), "config");
        assert_eq!(draws, 3);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn loop_ends_when_senders_are_gone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(AppMessage::Resize(120, 40)).unwrap();
        drop(tx);

        let mut browser = browser();
        run(&mut browser, &mut rx, |_| Ok(())).unwrap();

        let status = browser.screen().get(PaneId::Status).unwrap();
        assert_eq!(status.rect().y1, 39);
    }

    #[test]
    fn draw_failure_aborts_the_loop() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let mut browser = browser();

        let result = run(&mut browser, &mut rx, |_| Err(io::Error::other("gone")));
        assert!(result.is_err());
    }

    #[test]
    fn ticker_enqueues_status_ticks() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticker = spawn_status_ticker(runtime.handle(), tx);
        let first = runtime.block_on(async {
            tokio::time::timeout(Duration::from_secs(3), rx.recv()).await
        });

        assert_eq!(first.unwrap(), Some(AppMessage::StatusTick));
        ticker.abort();
    }
}
