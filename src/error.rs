//! Error types for the DMX relay controller.
//!
//! Each fallible operation returns its own narrow error type.  Startup
//! errors (`ConfigError`, `RegistrationError`) are fatal and abort before
//! the frame source is registered.  Per-frame errors (`DecodeError`,
//! `SinkError`, `ShutdownError`) are reported through the event sink and
//! never leave the frame handler.  Variants are `Copy` wherever the payload allows it so
//! they can be carried inside [`AppEvent`](crate::app::events::AppEvent)s
//! without allocation.

use core::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Frame decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The 1-based channel index lies beyond the end of the frame.
    OutOfRange { channel: u16, frame_len: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { channel, frame_len } => write!(
                f,
                "channel {} out of range for frame of {} slots",
                channel, frame_len
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// More slots than a single universe can carry.
    TooLong { len: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { len } => write!(f, "{len} slots exceed the 512-slot universe"),
        }
    }
}

impl std::error::Error for FrameError {}

// ---------------------------------------------------------------------------
// Output sink errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Setting the output pin level failed.
    GpioWriteFailed { pin: u8 },
    /// The register write on the relay board bus failed.
    BusWriteFailed { address: u8, register: u8 },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed { pin } => write!(f, "GPIO {pin} write failed"),
            Self::BusWriteFailed { address, register } => write!(
                f,
                "bus write to 0x{:02x} register {} failed",
                address, register
            ),
        }
    }
}

impl std::error::Error for SinkError {}

// ---------------------------------------------------------------------------
// Host shutdown errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownError {
    /// The shutdown command could not be spawned.
    SpawnFailed,
    /// The shutdown command ran but reported failure.
    CommandFailed { code: Option<i32> },
}

impl fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnFailed => write!(f, "shutdown command could not be spawned"),
            Self::CommandFailed { code: Some(code) } => {
                write!(f, "shutdown command exited with status {code}")
            }
            Self::CommandFailed { code: None } => {
                write!(f, "shutdown command terminated by signal")
            }
        }
    }
}

impl std::error::Error for ShutdownError {}

// ---------------------------------------------------------------------------
// Startup errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The receiver socket could not be opened.
    Bind(String),
    /// The universe could not be subscribed.
    Universe { universe: u16, reason: String },
    /// A handler is already registered for this universe.
    AlreadyRegistered(u16),
    /// The receive loop gave up after repeated failures.
    Lost(String),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(reason) => write!(f, "receiver bind failed: {reason}"),
            Self::Universe { universe, reason } => {
                write!(f, "universe {universe} subscription failed: {reason}")
            }
            Self::AlreadyRegistered(universe) => {
                write!(f, "universe {universe} already has a handler")
            }
            Self::Lost(reason) => write!(f, "subscription lost: {reason}"),
        }
    }
}

impl std::error::Error for RegistrationError {}

#[derive(Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    NotFound(PathBuf),
    /// The home directory could not be determined.
    NoHome,
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// Malformed syntax, missing key or non-integer value.
    Parse(String),
    /// Keys parse but describe an impossible setup.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file {} not found", path.display()),
            Self::NoHome => write!(f, "home directory unknown"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
