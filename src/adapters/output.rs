//! Output dispatcher.
//!
//! Selects the physical sink from [`OutputConfig`] at startup so the rest
//! of the controller is written once against [`OutputPort`].

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::actuation::Action;
use crate::app::ports::OutputPort;
use crate::config::OutputConfig;
use crate::error::SinkError;

use super::gpio_sink::GpioSink;
use super::relay_board::RelayBoardSink;

/// The configured sink of this deployment.
pub enum OutputDispatcher<P, I> {
    Gpio(GpioSink<P>),
    RelayBoard(RelayBoardSink<I>),
}

impl<P: OutputPin, I: I2c> OutputDispatcher<P, I> {
    /// Build the sink named by `config`, opening only the peripheral it
    /// needs through `open_pin` or `open_bus`.
    pub fn from_config<E>(
        config: OutputConfig,
        open_pin: impl FnOnce(u8) -> Result<P, E>,
        open_bus: impl FnOnce(u8) -> Result<I, E>,
    ) -> Result<Self, E> {
        Ok(match config {
            OutputConfig::Gpio { pin } => Self::Gpio(GpioSink::new(open_pin(pin)?, pin)),
            OutputConfig::RelayBoard {
                bus,
                address,
                relay,
            } => Self::RelayBoard(RelayBoardSink::new(open_bus(bus)?, address, relay)),
        })
    }
}

impl<P: OutputPin, I: I2c> OutputPort for OutputDispatcher<P, I> {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        match self {
            Self::Gpio(sink) => sink.apply(action),
            Self::RelayBoard(sink) => sink.apply(action),
        }
    }
}

impl<P, I> core::fmt::Display for OutputDispatcher<P, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Gpio(sink) => write!(f, "GPIO {}", sink.pin_number()),
            Self::RelayBoard(sink) => {
                write!(f, "relay {} @ 0x{:02x}", sink.relay(), sink.address())
            }
        }
    }
}
