//! Terminal event abstraction.
//!
//! Wraps crossterm events into a smaller enum and runs a blocking reader on
//! tokio's blocking pool, forwarding events over a channel so the main loop
//! stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Nothing arrived within the tick rate; used to advance the timer.
    Tick,
}

impl AppEvent {
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn the reader and return the receiving end.  The reader stops once the
/// receiver is dropped.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => AppEvent::from_crossterm(ev),
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    None
                }
            },
            Ok(false) => Some(AppEvent::Tick),
            Err(e) => {
                tracing::warn!("terminal poll failed, stopping event reader: {e}");
                break;
            }
        };

        if let Some(ev) = next {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    rx
}
