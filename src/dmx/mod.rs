//! DMX512 frame model and channel decoding.
//!
//! Frames arrive already decoded from the network protocol; this module
//! only deals with the slot values of one universe and the 1-based
//! channel addressing used by lighting desks.

pub mod frame;

pub use frame::{Channel, DMX_UNIVERSE_SIZE, Frame, decode};
