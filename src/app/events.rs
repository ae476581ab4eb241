//! Outbound application events.
//!
//! The [`RelayService`](super::service::RelayService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::actuation::Action;
use crate::dmx::Channel;
use crate::error::{DecodeError, ShutdownError, SinkError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service is ready to accept frames.
    Started {
        command: Channel,
        shutdown: Option<Channel>,
        threshold: u8,
    },

    /// The command channel changed value.
    ValueChanged { channel: Channel, from: u8, to: u8 },

    /// An output transition was written to the sink.
    ActionApplied { channel: Channel, action: Action },

    /// The sink rejected a transition; it is retried on the next differing value.
    WriteFailed { action: Action, error: SinkError },

    /// The shutdown channel was above the threshold in this frame.
    ShutdownRequested { channel: Channel, value: u8 },

    /// The host shutdown could not be invoked.
    ShutdownFailed(ShutdownError),

    /// A watched channel lies beyond the end of the received frame.
    ChannelOutOfRange(DecodeError),
}
