//! Frame decoder.
//!
//! A [`Frame`] holds up to 512 slot values.  Desks and config files count
//! channels from 1, so [`Channel`] stores the 1-based number and converts
//! to a slot offset only when reading.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, FrameError};

/// Number of slots in one DMX universe.
pub const DMX_UNIVERSE_SIZE: usize = 512;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A 1-based channel number in `1..=512`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Channel(u16);

impl Channel {
    /// Returns `None` for 0 or anything past the end of a universe.
    pub const fn new(number: u16) -> Option<Self> {
        if number >= 1 && number as usize <= DMX_UNIVERSE_SIZE {
            Some(Self(number))
        } else {
            None
        }
    }

    /// The channel number as printed on a desk.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Zero-based slot offset inside a frame.
    const fn offset(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u16> for Channel {
    type Error = &'static str;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::new(number).ok_or("channel must be within 1..=512")
    }
}

impl From<Channel> for u16 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Slot values of one received universe update.  Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    slots: Vec<u8, DMX_UNIVERSE_SIZE>,
}

impl Frame {
    /// Copy `slots` into a new frame.  Short frames are legal; senders may
    /// transmit fewer than 512 slots.
    pub fn from_slice(slots: &[u8]) -> Result<Self, FrameError> {
        Vec::from_slice(slots)
            .map(|slots| Self { slots })
            .map_err(|_| FrameError::TooLong { len: slots.len() })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }

    /// Value at `channel`; see [`decode`].
    pub fn value(&self, channel: Channel) -> Result<u8, DecodeError> {
        decode(self, channel)
    }
}

/// Read the value at a 1-based channel.
///
/// Fails with [`DecodeError::OutOfRange`] iff `channel > frame.len()`.
pub fn decode(frame: &Frame, channel: Channel) -> Result<u8, DecodeError> {
    frame
        .slots
        .get(channel.offset())
        .copied()
        .ok_or(DecodeError::OutOfRange {
            channel: channel.get(),
            frame_len: frame.len(),
        })
}
