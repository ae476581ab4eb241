//! Shutdown paths: level-triggered channel and local push button sharing
//! one host shutdown capability.

use std::sync::Arc;

use super::mock_hw::{MockEdge, MockHost, MockOutput, RecordingSink};

use dmxrelay::adapters::host_shutdown::HostShutdown;
use dmxrelay::app::controller::Controller;
use dmxrelay::app::events::AppEvent;
use dmxrelay::app::ports::ShutdownReason;
use dmxrelay::config::ChannelConfig;
use dmxrelay::dmx::{Channel, Frame};
use dmxrelay::drivers::button::ShutdownButton;

fn dual_channel() -> ChannelConfig {
    ChannelConfig {
        command: Channel::new(1).unwrap(),
        shutdown: Some(Channel::new(2).unwrap()),
        threshold: 128,
    }
}

#[test]
fn button_thread_requests_shutdown_per_press() {
    let host = Arc::new(MockHost::default());
    let handle = ShutdownButton::new(MockEdge { presses: 2 }, 3, host.clone())
        .spawn()
        .unwrap();
    assert_eq!(handle.join().unwrap(), "input closed");
    assert_eq!(host.count(), 2);
    assert_eq!(host.last(), Some(ShutdownReason::Button { pin: 3 }));
}

#[test]
fn held_shutdown_channel_invokes_host_once() {
    let host = Arc::new(HostShutdown::dry_run());
    let mut c = Controller::new(
        dual_channel(),
        MockOutput::default(),
        host.clone(),
        RecordingSink::default(),
    );
    for _ in 0..5 {
        c.on_frame(&Frame::from_slice(&[0, 255]).unwrap());
    }
    assert!(host.is_invoked());
    assert_eq!(c.service().shutdown_requests(), 5);
    assert_eq!(c.events().shutdown_requests(), 5);
}

#[test]
fn button_and_channel_share_one_shutdown() {
    let host = Arc::new(HostShutdown::dry_run());
    let mut button = ShutdownButton::new(MockEdge { presses: 1 }, 3, host.clone());
    assert_eq!(button.wait_and_shutdown(), Ok(Ok(())));
    assert!(host.is_invoked());

    let mut c = Controller::new(
        dual_channel(),
        MockOutput::default(),
        host.clone(),
        RecordingSink::default(),
    );
    let outcome = c.on_frame(&Frame::from_slice(&[0, 200]).unwrap());
    assert!(outcome.shutdown_requested);
    let failed = c
        .events()
        .count(|e| matches!(e, AppEvent::ShutdownFailed(_)));
    assert_eq!(failed, 0, "repeat request is absorbed by the host adapter");
}
