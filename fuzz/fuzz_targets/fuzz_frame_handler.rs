//! Fuzz target: `RelayService::handle_frame`
//!
//! Splits arbitrary bytes into frames and drives them through the service
//! with both channels watched.  Asserts that it never panics, that an
//! output write happens only when the output state changes, and that the
//! output state always matches the side of the threshold the last seen
//! value is on.
//!
//! cargo fuzz run fuzz_frame_handler

#![no_main]

use dmxrelay::actuation::{Action, THRESHOLD};
use dmxrelay::app::events::AppEvent;
use dmxrelay::app::ports::{EventSink, OutputPort, ShutdownPort, ShutdownReason};
use dmxrelay::app::service::RelayService;
use dmxrelay::config::ChannelConfig;
use dmxrelay::dmx::{Channel, DMX_UNIVERSE_SIZE, Frame};
use dmxrelay::error::{ShutdownError, SinkError};
use libfuzzer_sys::fuzz_target;

struct Output(Option<bool>);

impl OutputPort for Output {
    fn apply(&mut self, action: Action) -> Result<(), SinkError> {
        let on = action == Action::Activate;
        assert_ne!(self.0, Some(on), "redundant write");
        self.0 = Some(on);
        Ok(())
    }
}

struct Host;

impl ShutdownPort for Host {
    fn request_shutdown(&self, _reason: ShutdownReason) -> Result<(), ShutdownError> {
        Ok(())
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&command, rest)) = data.split_first() else {
        return;
    };
    let command = Channel::new(u16::from(command) + 1).unwrap_or(Channel::new(1).unwrap());
    let mut svc = RelayService::new(ChannelConfig {
        command,
        shutdown: Channel::new(command.get() % 512 + 1),
        threshold: THRESHOLD,
    });
    let mut out = Output(None);

    // Each chunk is one frame: a length byte followed by that many slots.
    let mut rest = rest;
    while let Some((&len, tail)) = rest.split_first() {
        let len = usize::from(len).min(tail.len()).min(DMX_UNIVERSE_SIZE);
        let (slots, tail) = tail.split_at(len);
        rest = tail;

        let frame = Frame::from_slice(slots).unwrap();
        svc.handle_frame(&frame, &mut out, &Host, &mut Discard);

        let state = svc.state();
        assert_eq!(state.is_active, state.last_value > THRESHOLD);
    }
});
