//! Controller: the service bundled with its adapters.
//!
//! [`RelayService`] takes its ports as call-site arguments.  The frame
//! worker needs one owned value it can call per frame, so the
//! [`Controller`] holds the service together with the output sink, the
//! shutdown port and the event sink that were selected at startup.

use crate::actuation::ActuationState;
use crate::config::ChannelConfig;
use crate::dmx::Frame;

use super::ports::{EventSink, OutputPort, ShutdownPort};
use super::service::{FrameOutcome, RelayService};

pub struct Controller<O, H, E> {
    service: RelayService,
    output: O,
    host: H,
    events: E,
}

impl<O: OutputPort, H: ShutdownPort, E: EventSink> Controller<O, H, E> {
    /// Build the controller and announce the watched channels.
    pub fn new(config: ChannelConfig, output: O, host: H, mut events: E) -> Self {
        let service = RelayService::new(config);
        service.start(&mut events);
        Self {
            service,
            output,
            host,
            events,
        }
    }

    /// Handle one received frame.
    pub fn on_frame(&mut self, frame: &Frame) -> FrameOutcome {
        self.service
            .handle_frame(frame, &mut self.output, &self.host, &mut self.events)
    }

    pub fn service(&self) -> &RelayService {
        &self.service
    }

    pub fn state(&self) -> ActuationState {
        self.service.state()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Hand back the adapters.
    pub fn into_parts(self) -> (O, H, E) {
        (self.output, self.host, self.events)
    }
}
