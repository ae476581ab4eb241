//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   FrameSource ──▶ RelayService (domain) ──▶ OutputPort / ShutdownPort / EventSink
//! ```
//!
//! Driven adapters (output sinks, host shutdown, event sinks) implement
//! these traits.  The [`RelayService`](super::service::RelayService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use std::sync::Arc;

use crate::actuation::Action;
use crate::dmx::{Channel, Frame};
use crate::error::{RegistrationError, ShutdownError, SinkError};

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → relay / GPIO)
// ───────────────────────────────────────────────────────────────

/// Write-side port: performs the physical effect of an [`Action`].
pub trait OutputPort {
    /// Drive the output for `action`.  `Action::None` must not touch the
    /// hardware.
    fn apply(&mut self, action: Action) -> Result<(), SinkError>;
}

impl<T: OutputPort + ?Sized> OutputPort for Box<T> {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        (**self).apply(action)
    }
}

// ───────────────────────────────────────────────────────────────
// Shutdown port (driven adapter: domain → host)
// ───────────────────────────────────────────────────────────────

/// Why a host shutdown was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The shutdown channel was above the threshold.
    Channel { channel: Channel, value: u8 },
    /// The local shutdown button was pressed.
    Button { pin: u8 },
}

/// Requests a host shutdown.
///
/// Shared between the frame worker and the button watcher, so it takes
/// `&self`.  Implementations must tolerate repeated calls: the shutdown
/// channel fires on every frame while it is held high.
pub trait ShutdownPort {
    fn request_shutdown(&self, reason: ShutdownReason) -> Result<(), ShutdownError>;
}

impl<T: ShutdownPort + ?Sized> ShutdownPort for &T {
    fn request_shutdown(&self, reason: ShutdownReason) -> Result<(), ShutdownError> {
        (**self).request_shutdown(reason)
    }
}

impl<T: ShutdownPort + ?Sized> ShutdownPort for Arc<T> {
    fn request_shutdown(&self, reason: ShutdownReason) -> Result<(), ShutdownError> {
        (**self).request_shutdown(reason)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Frame source (driving adapter: network → domain)
// ───────────────────────────────────────────────────────────────

/// Subscription to received universes.
///
/// `on_frame` is the only entry point into the core.  It is invoked from
/// the source's own run loop, once per received frame, never concurrently.
pub trait FrameSource {
    /// Register `on_frame` for `universe`.  Called once at startup.
    fn register_universe<F>(&mut self, universe: u16, on_frame: F) -> Result<(), RegistrationError>
    where
        F: FnMut(Frame) + Send + 'static;

    /// Run the receive loop.  Returns only when the subscription is lost.
    fn run(self) -> Result<(), RegistrationError>;
}

// ───────────────────────────────────────────────────────────────
// Edge input (driven adapter: button GPIO → watcher)
// ───────────────────────────────────────────────────────────────

/// Blocking falling-edge wait on a digital input.
pub trait EdgeInput {
    type Error: core::fmt::Debug;

    /// Block until the input sees a falling edge.
    fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error>;
}
