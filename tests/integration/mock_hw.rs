//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full write and
//! shutdown history without touching real GPIO, I²C or the host.

use std::sync::Mutex;

use dmxrelay::actuation::Action;
use dmxrelay::app::events::AppEvent;
use dmxrelay::app::ports::{
    EdgeInput, EventSink, FrameSource, OutputPort, ShutdownPort, ShutdownReason,
};
use dmxrelay::dmx::Frame;
use dmxrelay::error::{RegistrationError, ShutdownError, SinkError};
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c, Operation};

// ── MockOutput ────────────────────────────────────────────────

/// Records applied actions; `fail` makes every write fail.
#[derive(Default)]
pub struct MockOutput {
    pub calls: Vec<Action>,
    pub fail: bool,
}

impl OutputPort for MockOutput {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::GpioWriteFailed { pin: 17 });
        }
        self.calls.push(action);
        Ok(())
    }
}

// ── MockHost ──────────────────────────────────────────────────

/// Counts shutdown requests.  Never halts anything.
#[derive(Default)]
pub struct MockHost {
    pub requests: Mutex<Vec<ShutdownReason>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockHost {
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<ShutdownReason> {
        self.requests.lock().unwrap().last().copied()
    }
}

impl ShutdownPort for MockHost {
    fn request_shutdown(&self, reason: ShutdownReason) -> Result<(), ShutdownError> {
        self.requests.lock().unwrap().push(reason);
        if self.fail {
            Err(ShutdownError::CommandFailed { code: Some(1) })
        } else {
            Ok(())
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn shutdown_requests(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::ShutdownRequested { .. }))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockPin (embedded-hal OutputPin) ──────────────────────────

/// Records line levels: `true` = HIGH.
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

// ── MockBus (embedded-hal I2c) ────────────────────────────────

/// Records `(address, bytes)` of every write.
#[derive(Default)]
pub struct MockBus {
    pub writes: Vec<(u8, Vec<u8>)>,
}

impl i2c::ErrorType for MockBus {
    type Error = i2c::ErrorKind;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            if let Operation::Write(bytes) = op {
                self.writes.push((address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

// ── MockEdge ──────────────────────────────────────────────────

/// Delivers `presses` falling edges, then reports the input closed.
pub struct MockEdge {
    pub presses: u32,
}

impl EdgeInput for MockEdge {
    type Error = &'static str;

    fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        if self.presses == 0 {
            return Err("input closed");
        }
        self.presses -= 1;
        Ok(())
    }
}

// ── MockFrameSource ───────────────────────────────────────────

type Handler = Box<dyn FnMut(Frame) + Send>;

/// Replays queued `(universe, frame)` pairs to the registered handlers.
#[derive(Default)]
pub struct MockFrameSource {
    handlers: Vec<(u16, Handler)>,
    queued: Vec<(u16, Frame)>,
}

#[allow(dead_code)]
impl MockFrameSource {
    pub fn queue(&mut self, universe: u16, slots: &[u8]) {
        let frame = Frame::from_slice(slots).unwrap();
        self.queued.push((universe, frame));
    }
}

impl FrameSource for MockFrameSource {
    fn register_universe<F>(&mut self, universe: u16, on_frame: F) -> Result<(), RegistrationError>
    where
        F: FnMut(Frame) + Send + 'static,
    {
        if self.handlers.iter().any(|(u, _)| *u == universe) {
            return Err(RegistrationError::AlreadyRegistered(universe));
        }
        self.handlers.push((universe, Box::new(on_frame)));
        Ok(())
    }

    fn run(mut self) -> Result<(), RegistrationError> {
        for (universe, frame) in self.queued.drain(..) {
            for (_, handler) in self.handlers.iter_mut().filter(|(u, _)| *u == universe) {
                handler(frame.clone());
            }
        }
        Err(RegistrationError::Lost("replay finished".into()))
    }
}
