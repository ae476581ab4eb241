//! Application service: the hexagonal core.
//!
//! [`RelayService`] owns the channel configuration and one
//! [`ChannelMonitor`] per watched channel.  It exposes a single
//! per-frame entry point; all I/O flows through port traits injected at
//! call sites, making the whole service testable with mock adapters.
//!
//! ```text
//!                  ┌─────────────────────────────┐ ──▶ OutputPort
//!  Frame ────────▶ │        RelayService         │
//!                  │ command (Edge) · shutdown   │ ──▶ ShutdownPort
//!                  │ (Level)                     │
//!                  └─────────────────────────────┘ ──▶ EventSink
//! ```

use log::debug;

use crate::actuation::{Action, ActuationState, ChannelMonitor};
use crate::config::ChannelConfig;
use crate::dmx::Frame;

use super::events::AppEvent;
use super::ports::{EventSink, OutputPort, ShutdownPort, ShutdownReason};

// ───────────────────────────────────────────────────────────────
// Per-frame outcome
// ───────────────────────────────────────────────────────────────

/// What one call to [`RelayService::handle_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Action proposed by the command channel (`None` when debounced,
    /// unchanged side of the threshold, or out of range).
    pub action: Action,
    /// Whether `action` reached the output.
    pub applied: bool,
    /// Whether the shutdown channel fired in this frame.
    pub shutdown_requested: bool,
}

// ───────────────────────────────────────────────────────────────
// RelayService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct RelayService {
    config: ChannelConfig,
    command: ChannelMonitor,
    shutdown: Option<ChannelMonitor>,
    frame_count: u64,
    shutdown_requests: u64,
}

impl RelayService {
    pub fn new(config: ChannelConfig) -> Self {
        let command = ChannelMonitor::edge(config.command).with_threshold(config.threshold);
        let shutdown = config
            .shutdown
            .map(|ch| ChannelMonitor::level(ch).with_threshold(config.threshold));
        Self {
            config,
            command,
            shutdown,
            frame_count: 0,
            shutdown_requests: 0,
        }
    }

    /// Announce the watched channels.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            command: self.config.command,
            shutdown: self.config.shutdown,
            threshold: self.config.threshold,
        });
    }

    // ── Per-frame orchestration ───────────────────────────────

    /// Evaluate one frame: command channel → output, shutdown channel → host.
    ///
    /// Never fails.  Decode, sink and shutdown errors are reported through
    /// `sink` and leave the service ready for the next frame.
    pub fn handle_frame(
        &mut self,
        frame: &Frame,
        output: &mut impl OutputPort,
        host: &impl ShutdownPort,
        sink: &mut impl EventSink,
    ) -> FrameOutcome {
        self.frame_count += 1;
        let (action, applied) = self.process_command(frame, output, sink);
        let shutdown_requested = self.process_shutdown(frame, host, sink);
        FrameOutcome {
            action,
            applied,
            shutdown_requested,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// State of the command channel.
    pub fn state(&self) -> ActuationState {
        self.command.state()
    }

    /// Frames handled since startup.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Shutdown requests raised by the shutdown channel since startup.
    pub fn shutdown_requests(&self) -> u64 {
        self.shutdown_requests
    }

    // ── Internal ──────────────────────────────────────────────

    fn process_command(
        &mut self,
        frame: &Frame,
        output: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) -> (Action, bool) {
        let channel = self.command.channel();
        let before = self.command.state().last_value;

        let action = match self.command.evaluate(frame) {
            Ok(action) => action,
            Err(e) => {
                sink.emit(&AppEvent::ChannelOutOfRange(e));
                return (Action::None, false);
            }
        };

        let after = self.command.state().last_value;
        if after != before {
            sink.emit(&AppEvent::ValueChanged {
                channel,
                from: before,
                to: after,
            });
        }

        if action.is_none() {
            return (action, false);
        }

        match output.apply(action) {
            Ok(()) => {
                self.command.commit(action);
                sink.emit(&AppEvent::ActionApplied { channel, action });
                (action, true)
            }
            Err(error) => {
                sink.emit(&AppEvent::WriteFailed { action, error });
                (action, false)
            }
        }
    }

    fn process_shutdown(
        &mut self,
        frame: &Frame,
        host: &impl ShutdownPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let Some(monitor) = self.shutdown.as_mut() else {
            return false;
        };

        let action = match monitor.evaluate(frame) {
            Ok(action) => action,
            Err(e) => {
                sink.emit(&AppEvent::ChannelOutOfRange(e));
                return false;
            }
        };
        monitor.commit(action);
        if action != Action::Activate {
            return false;
        }

        let channel = monitor.channel();
        let value = monitor.state().last_value;
        self.shutdown_requests += 1;
        sink.emit(&AppEvent::ShutdownRequested { channel, value });

        if let Err(e) = host.request_shutdown(ShutdownReason::Channel { channel, value }) {
            sink.emit(&AppEvent::ShutdownFailed(e));
        }
        debug!("shutdown request #{} on channel {}", self.shutdown_requests, channel);
        true
    }
}
