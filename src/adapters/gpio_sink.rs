//! Single-pin GPIO output sink.
//!
//! The switched device idles (safe state) with the line HIGH; `Activate`
//! pulls it LOW.  The pin must already be driven HIGH when handed over,
//! which the Raspberry Pi binding does with `into_output_high`.
//!
//! Generic over [`embedded_hal::digital::OutputPin`] so host tests run
//! against a recording mock.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::actuation::Action;
use crate::app::ports::OutputPort;
use crate::error::SinkError;

pub struct GpioSink<P> {
    pin: P,
    number: u8,
}

impl<P> GpioSink<P> {
    /// `number` is the BCM pin number, used for error reports only.
    pub fn new(pin: P, number: u8) -> Self {
        Self { pin, number }
    }

    pub fn pin_number(&self) -> u8 {
        self.number
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputPort for GpioSink<P> {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        let result = match action {
            Action::Activate => self.pin.set_low(),
            Action::Deactivate => self.pin.set_high(),
            Action::None => return Ok(()),
        };
        result.map_err(|e| {
            debug!("GPIO {}: {:?}", self.number, e);
            SinkError::GpioWriteFailed { pin: self.number }
        })
    }
}
