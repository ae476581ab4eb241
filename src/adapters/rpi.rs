//! Raspberry Pi peripheral bindings (`rppal`).
//!
//! Opens the output pin, the relay board bus and the shutdown button
//! input.  `rppal` implements the `embedded-hal` traits the sinks are
//! generic over, so nothing else in the crate depends on it.

use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};
use rppal::i2c::I2c;

use crate::app::ports::EdgeInput;

/// Claim `pin` as an output already driven to the idle (HIGH) level.
pub fn output_pin(pin: u8) -> Result<OutputPin, rppal::gpio::Error> {
    Ok(Gpio::new()?.get(pin)?.into_output_high())
}

/// Open I²C bus `bus` (`/dev/i2c-<bus>`).
pub fn i2c_bus(bus: u8) -> Result<I2c, rppal::i2c::Error> {
    I2c::with_bus(bus)
}

/// Pulled-up push button that reads LOW while pressed.
pub struct ButtonPin {
    input: InputPin,
}

impl ButtonPin {
    pub fn open(pin: u8) -> Result<Self, rppal::gpio::Error> {
        let mut input = Gpio::new()?.get(pin)?.into_input_pullup();
        input.set_interrupt(Trigger::FallingEdge, None)?;
        Ok(Self { input })
    }
}

impl EdgeInput for ButtonPin {
    type Error = rppal::gpio::Error;

    fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            if self.input.poll_interrupt(true, None)?.is_some() {
                return Ok(());
            }
        }
    }
}
