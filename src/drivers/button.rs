//! Local shutdown push button.
//!
//! ## Hardware
//!
//! Active-low momentary switch on a pulled-up input.  The pin interrupt
//! fires on the falling edge; the watcher thread blocks on it and asks the
//! host to shut down on every press.
//!
//! Runs independently of frame reception: a press is honoured even when
//! no universe is being received.

use std::thread::JoinHandle;

use log::{info, warn};

use crate::app::ports::{EdgeInput, ShutdownPort, ShutdownReason};
use crate::error::ShutdownError;

pub struct ShutdownButton<I, H> {
    input: I,
    pin: u8,
    host: H,
}

impl<I: EdgeInput, H: ShutdownPort> ShutdownButton<I, H> {
    pub fn new(input: I, pin: u8, host: H) -> Self {
        Self { input, pin, host }
    }

    /// GPIO pin this button is attached to.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Block for one press, then request shutdown.
    pub fn wait_and_shutdown(&mut self) -> Result<Result<(), ShutdownError>, I::Error> {
        self.input.wait_for_falling_edge()?;
        info!("Shutdown button on GPIO {} pressed", self.pin);
        Ok(self.host.request_shutdown(ShutdownReason::Button { pin: self.pin }))
    }

    /// Watch the button until the input fails.
    pub fn run(mut self) -> I::Error {
        loop {
            match self.wait_and_shutdown() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Button shutdown failed: {}", e),
                Err(e) => {
                    warn!("Shutdown button on GPIO {} stopped: {:?}", self.pin, e);
                    return e;
                }
            }
        }
    }
}

impl<I, H> ShutdownButton<I, H>
where
    I: EdgeInput + Send + 'static,
    I::Error: Send,
    H: ShutdownPort + Send + 'static,
{
    /// Run the watcher on its own thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<I::Error>> {
        info!("Watching shutdown button on GPIO {}", self.pin);
        std::thread::Builder::new()
            .name("shutdown-button".into())
            .spawn(move || self.run())
    }
}
