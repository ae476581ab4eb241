//! Application core: pure frame-to-action logic, zero I/O.
//!
//! This module turns received frames into output transitions and shutdown
//! requests.  All interaction with hardware, the host and the network
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod controller;
pub mod events;
pub mod ports;
pub mod service;
