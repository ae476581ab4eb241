//! E1.31 (sACN) frame source.
//!
//! Wraps the `sacn` crate receiver, which owns all protocol parsing.  The
//! receive loop runs on the calling thread and invokes the registered
//! handler once per received universe update.
//!
//! See <https://wiki.openlighting.org/index.php/E1.31>

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use log::{debug, info, warn};
use sacn::packet::ACN_SDT_MULTICAST_PORT;
use sacn::receive::SacnReceiver;

use crate::app::ports::FrameSource;
use crate::dmx::Frame;
use crate::error::RegistrationError;

/// Consecutive receive errors tolerated before the subscription is
/// considered lost.
const MAX_CONSECUTIVE_ERRORS: u32 = 100;

/// DMX null start code; other start codes carry non-level data.
const NULL_START_CODE: u8 = 0x00;

type Handler = Box<dyn FnMut(Frame) + Send>;

pub struct SacnFrameSource {
    receiver: SacnReceiver,
    handlers: Vec<(u16, Handler)>,
}

impl SacnFrameSource {
    /// Listen on all interfaces on the standard sACN port.
    pub fn bind() -> Result<Self, RegistrationError> {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), ACN_SDT_MULTICAST_PORT);
        let receiver =
            SacnReceiver::with_ip(addr, None).map_err(|e| RegistrationError::Bind(e.to_string()))?;
        info!("sACN receiver bound to {}", addr);
        Ok(Self {
            receiver,
            handlers: Vec::new(),
        })
    }

    fn dispatch(&mut self, universe: u16, values: &[u8]) {
        let Some((&start_code, slots)) = values.split_first() else {
            return;
        };
        if start_code != NULL_START_CODE {
            debug!("universe {}: ignoring start code 0x{:02x}", universe, start_code);
            return;
        }
        let frame = match Frame::from_slice(slots) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("universe {}: {}", universe, e);
                return;
            }
        };
        for (_, handler) in self.handlers.iter_mut().filter(|(u, _)| *u == universe) {
            handler(frame.clone());
        }
    }
}

impl FrameSource for SacnFrameSource {
    fn register_universe<F>(&mut self, universe: u16, on_frame: F) -> Result<(), RegistrationError>
    where
        F: FnMut(Frame) + Send + 'static,
    {
        if self.handlers.iter().any(|(u, _)| *u == universe) {
            return Err(RegistrationError::AlreadyRegistered(universe));
        }
        self.receiver
            .listen_universes(&[universe])
            .map_err(|e| RegistrationError::Universe {
                universe,
                reason: e.to_string(),
            })?;
        self.handlers.push((universe, Box::new(on_frame)));
        info!("Registered for sACN universe {}", universe);
        Ok(())
    }

    fn run(mut self) -> Result<(), RegistrationError> {
        let mut errors = 0u32;
        loop {
            match self.receiver.recv(None) {
                Ok(batch) => {
                    errors = 0;
                    for data in batch {
                        self.dispatch(data.universe, &data.values);
                    }
                }
                Err(e) => {
                    errors += 1;
                    warn!("sACN receive failed ({}/{}): {}", errors, MAX_CONSECUTIVE_ERRORS, e);
                    if errors >= MAX_CONSECUTIVE_ERRORS {
                        return Err(RegistrationError::Lost(e.to_string()));
                    }
                }
            }
        }
    }
}
