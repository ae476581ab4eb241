//! I²C relay board sink.
//!
//! The board exposes one register per relay at a fixed device address
//! (0x10 on bus 1).  Writing `0xFF` to a relay's register closes it,
//! `0x00` opens it.  One write per transition, none for `Action::None`.

use embedded_hal::i2c::I2c;
use log::debug;

use crate::actuation::Action;
use crate::app::ports::OutputPort;
use crate::error::SinkError;

/// Register value that closes a relay.
pub const RELAY_ON: u8 = 0xFF;
/// Register value that opens a relay.
pub const RELAY_OFF: u8 = 0x00;

pub struct RelayBoardSink<I> {
    bus: I,
    address: u8,
    relay: u8,
}

impl<I> RelayBoardSink<I> {
    pub fn new(bus: I, address: u8, relay: u8) -> Self {
        Self {
            bus,
            address,
            relay,
        }
    }

    pub fn relay(&self) -> u8 {
        self.relay
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn into_inner(self) -> I {
        self.bus
    }
}

impl<I: I2c> OutputPort for RelayBoardSink<I> {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        let value = match action {
            Action::Activate => RELAY_ON,
            Action::Deactivate => RELAY_OFF,
            Action::None => return Ok(()),
        };
        self.bus
            .write(self.address, &[self.relay, value])
            .map_err(|e| {
                debug!("I2C 0x{:02x}: {:?}", self.address, e);
                SinkError::BusWriteFailed {
                    address: self.address,
                    register: self.relay,
                }
            })
    }
}
