//! DmxRelay controller library.
//!
//! Exposes the frame-to-actuator logic for integration testing.  The
//! Raspberry Pi bindings (`rpi`) and the E1.31 receiver (`e131`) are
//! behind features so everything else builds and tests on any host.

#![deny(unused_must_use)]

pub mod actuation;
pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod dmx;
pub mod drivers;
pub mod error;
pub mod frame_queue;
