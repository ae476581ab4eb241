//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Value changes go out at debug level since they
//! arrive at the console refresh rate; everything else is info or above.

use log::Level;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }

    /// Level and tagged line for `event`.
    pub fn render(event: &AppEvent) -> (Level, String) {
        match event {
            AppEvent::Started {
                command,
                shutdown: Some(sd),
                threshold,
            } => (
                Level::Info,
                format!("START | command=ch{command} shutdown=ch{sd} threshold={threshold}"),
            ),
            AppEvent::Started {
                command,
                shutdown: None,
                threshold,
            } => (
                Level::Info,
                format!("START | command=ch{command} threshold={threshold}"),
            ),
            AppEvent::ValueChanged { channel, from, to } => {
                (Level::Debug, format!("VALUE | ch{channel} {from} -> {to}"))
            }
            AppEvent::ActionApplied { channel, action } => {
                (Level::Info, format!("ACTION | ch{channel} {action:?}"))
            }
            AppEvent::WriteFailed { action, error } => (
                Level::Warn,
                format!("WRITE | {action:?} failed: {error} (will retry on next change)"),
            ),
            AppEvent::ShutdownRequested { channel, value } => (
                Level::Warn,
                format!("SHUTDOWN | requested by ch{channel} (value={value})"),
            ),
            AppEvent::ShutdownFailed(e) => (Level::Error, format!("SHUTDOWN | {e}")),
            AppEvent::ChannelOutOfRange(e) => {
                (Level::Warn, format!("RANGE | {e} (channel skipped)"))
            }
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let (level, line) = Self::render(event);
        log::log!(level, "{}", line);
    }
}
