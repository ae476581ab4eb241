//! End-to-end scenarios for the RelayService → OutputPort / ShutdownPort
//! pipeline, threshold 128, command channel 5, shutdown channel 6.

use super::mock_hw::{MockBus, MockHost, MockOutput, MockPin, RecordingSink};

use dmxrelay::actuation::{Action, ActuationState};
use dmxrelay::adapters::output::OutputDispatcher;
use dmxrelay::app::controller::Controller;
use dmxrelay::app::events::AppEvent;
use dmxrelay::app::ports::ShutdownReason;
use dmxrelay::app::service::RelayService;
use dmxrelay::config::{ChannelConfig, OutputConfig, RelayConfig};
use dmxrelay::dmx::{Channel, Frame};
use dmxrelay::error::{DecodeError, SinkError};

fn channels(shutdown: Option<u16>) -> ChannelConfig {
    channels_on(5, shutdown)
}

fn channels_on(command: u16, shutdown: Option<u16>) -> ChannelConfig {
    ChannelConfig {
        command: Channel::new(command).unwrap(),
        shutdown: shutdown.and_then(Channel::new),
        threshold: 128,
    }
}

/// Frame whose slot 5 is `ch5` and slot 6 is `ch6`.
fn frame(ch5: u8, ch6: u8) -> Frame {
    Frame::from_slice(&[0, 0, 0, 0, ch5, ch6]).unwrap()
}

struct Rig {
    svc: RelayService,
    out: MockOutput,
    host: MockHost,
    sink: RecordingSink,
}

impl Rig {
    fn new(shutdown: Option<u16>) -> Self {
        Self::with_channels(channels(shutdown))
    }

    fn with_channels(config: ChannelConfig) -> Self {
        let svc = RelayService::new(config);
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);
        Self {
            svc,
            out: MockOutput::default(),
            host: MockHost::default(),
            sink,
        }
    }

    fn feed(&mut self, f: &Frame) -> Action {
        self.svc
            .handle_frame(f, &mut self.out, &self.host, &mut self.sink)
            .action
    }
}

// ── Scenario 1: first value above threshold activates ─────────

#[test]
fn first_frame_above_threshold_activates() {
    let mut rig = Rig::new(None);
    assert_eq!(rig.feed(&frame(200, 0)), Action::Activate);
    assert_eq!(rig.out.calls, vec![Action::Activate]);
    assert_eq!(
        rig.svc.state(),
        ActuationState {
            last_value: 200,
            is_active: true
        }
    );
}

// ── Scenario 2: repeated frame is debounced ───────────────────

#[test]
fn repeated_frame_writes_nothing() {
    let mut rig = Rig::new(None);
    rig.feed(&frame(200, 0));
    assert_eq!(rig.feed(&frame(200, 0)), Action::None);
    assert_eq!(rig.out.calls.len(), 1, "no second write");
}

// ── Scenario 3: dropping below threshold deactivates ──────────

#[test]
fn falling_below_threshold_deactivates() {
    let mut rig = Rig::new(None);
    rig.feed(&frame(200, 0));
    assert_eq!(rig.feed(&frame(50, 0)), Action::Deactivate);
    assert_eq!(rig.out.calls, vec![Action::Activate, Action::Deactivate]);
    assert!(!rig.svc.state().is_active);
}

// ── Scenario 4: changes below threshold only track the value ──

#[test]
fn changes_below_threshold_update_last_value_only() {
    let mut rig = Rig::new(None);
    assert_eq!(rig.feed(&frame(90, 0)), Action::None);
    assert_eq!(rig.svc.state().last_value, 90);
    assert_eq!(rig.feed(&frame(110, 0)), Action::None);
    assert_eq!(rig.svc.state().last_value, 110);
    assert!(rig.out.calls.is_empty());

    let changes = rig
        .sink
        .count(|e| matches!(e, AppEvent::ValueChanged { .. }));
    assert_eq!(changes, 2);
}

// ── Scenario 5: shutdown channel is level-triggered ───────────

#[test]
fn shutdown_fires_on_every_frame_above_threshold() {
    let mut rig = Rig::new(Some(6));
    rig.feed(&frame(0, 200));
    rig.feed(&frame(0, 200));
    assert_eq!(rig.sink.shutdown_requests(), 2);
    assert_eq!(rig.host.count(), 2);
    assert_eq!(
        rig.host.last(),
        Some(ShutdownReason::Channel {
            channel: Channel::new(6).unwrap(),
            value: 200
        })
    );

    rig.feed(&frame(0, 128));
    assert_eq!(rig.host.count(), 2, "128 is not above the threshold");
}

#[test]
fn shutdown_failure_is_reported_and_processing_continues() {
    let mut rig = Rig::new(Some(6));
    rig.host.fail = true;
    rig.feed(&frame(0, 255));
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ShutdownFailed(_))),
        1
    );
    assert_eq!(rig.feed(&frame(200, 255)), Action::Activate);
}

// ── Scenario 6: short frame is out of range ───────────────────

#[test]
fn short_frame_is_out_of_range_and_keeps_state() {
    let mut rig = Rig::new(None);
    rig.feed(&frame(200, 0));
    let before = rig.svc.state();

    let short = Frame::from_slice(&[1, 2, 3, 4]).unwrap();
    assert_eq!(rig.feed(&short), Action::None);
    assert_eq!(rig.svc.state(), before);
    assert!(rig.sink.events.contains(&AppEvent::ChannelOutOfRange(
        DecodeError::OutOfRange {
            channel: 5,
            frame_len: 4
        }
    )));

    // Next frame is accepted.
    assert_eq!(rig.feed(&frame(10, 0)), Action::Deactivate);
}

#[test]
fn short_frame_skips_only_the_missing_shutdown_channel() {
    let mut rig = Rig::new(Some(6));
    let five = Frame::from_slice(&[0, 0, 0, 0, 200]).unwrap();

    let outcome = rig
        .svc
        .handle_frame(&five, &mut rig.out, &rig.host, &mut rig.sink);
    assert_eq!(outcome.action, Action::Activate);
    assert!(!outcome.shutdown_requested);
    assert_eq!(rig.out.calls, vec![Action::Activate]);
    assert_eq!(rig.host.count(), 0);
    assert!(rig.sink.events.contains(&AppEvent::ChannelOutOfRange(
        DecodeError::OutOfRange {
            channel: 6,
            frame_len: 5
        }
    )));
}

#[test]
fn short_frame_skips_only_the_missing_command_channel() {
    let mut rig = Rig::with_channels(channels_on(6, Some(5)));
    rig.feed(&Frame::from_slice(&[0, 0, 0, 0, 0, 200]).unwrap());
    let before = rig.svc.state();
    let five = Frame::from_slice(&[0, 0, 0, 0, 200]).unwrap();

    let outcome = rig
        .svc
        .handle_frame(&five, &mut rig.out, &rig.host, &mut rig.sink);
    assert_eq!(outcome.action, Action::None);
    assert!(outcome.shutdown_requested);
    assert_eq!(rig.svc.state(), before, "command state untouched");
    assert_eq!(
        rig.host.last(),
        Some(ShutdownReason::Channel {
            channel: Channel::new(5).unwrap(),
            value: 200
        })
    );
    assert!(rig.sink.events.contains(&AppEvent::ChannelOutOfRange(
        DecodeError::OutOfRange {
            channel: 6,
            frame_len: 5
        }
    )));
}

// ── Sink failures ─────────────────────────────────────────────

#[test]
fn failed_write_is_retried_on_next_differing_value() {
    let mut rig = Rig::new(None);
    rig.out.fail = true;
    assert_eq!(rig.feed(&frame(200, 0)), Action::Activate);
    assert!(!rig.svc.state().is_active, "failed write not committed");
    assert!(rig.sink.events.contains(&AppEvent::WriteFailed {
        action: Action::Activate,
        error: SinkError::GpioWriteFailed { pin: 17 }
    }));

    rig.out.fail = false;
    assert_eq!(rig.feed(&frame(200, 0)), Action::None, "same value debounced");
    assert_eq!(rig.feed(&frame(201, 0)), Action::Activate);
    assert!(rig.svc.state().is_active);
    assert_eq!(rig.out.calls, vec![Action::Activate]);
}

// ── Through the output dispatcher ─────────────────────────────

type Dispatcher = OutputDispatcher<MockPin, MockBus>;

fn dispatcher(config: OutputConfig) -> Dispatcher {
    Dispatcher::from_config(
        config,
        |_| Ok::<_, ()>(MockPin::default()),
        |_| Ok(MockBus::default()),
    )
    .unwrap()
}

fn run_sequence(config: OutputConfig) -> Dispatcher {
    let host = MockHost::default();
    let mut c = Controller::new(channels(None), dispatcher(config), &host, RecordingSink::default());
    for v in [200, 200, 50, 90, 110, 255] {
        c.on_frame(&frame(v, 0));
    }
    c.into_parts().0
}

#[test]
fn gpio_output_is_active_low() {
    let Dispatcher::Gpio(sink) = run_sequence(OutputConfig::Gpio { pin: 17 }) else {
        panic!("expected GPIO sink");
    };
    // Activate, Deactivate, Activate.
    assert_eq!(sink.into_inner().levels, vec![false, true, false]);
}

#[test]
fn relay_board_gets_full_scale_register_writes() {
    let config = RelayConfig::parse("[DEFAULT]\nchannel = 5\nrelay = 2\n").unwrap();
    let Dispatcher::RelayBoard(sink) = run_sequence(config.output) else {
        panic!("expected relay board sink");
    };
    assert_eq!(
        sink.into_inner().writes,
        vec![
            (0x10, vec![2, 0xFF]),
            (0x10, vec![2, 0x00]),
            (0x10, vec![2, 0xFF]),
        ]
    );
}
