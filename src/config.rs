//! Controller configuration.
//!
//! Loaded once at startup from `~/.dmx_relay.conf` (or a path given on the
//! command line) and immutable afterwards.  The file keeps the layout the
//! deployed units already use, a `[DEFAULT]` section of integer keys.  INI
//! forms are normalized before the TOML parse: `key: value` lines, `;`
//! comment lines and mixed-case keys are accepted.
//!
//! ```toml
//! [DEFAULT]
//! channel = 5
//! shutdown_channel = 6
//! pin = 17        # or: relay = 3
//! shutdown = 3
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::actuation::THRESHOLD;
use crate::dmx::Channel;
use crate::error::ConfigError;

/// File name looked up in the home directory.
pub const CONFIG_FILE: &str = ".dmx_relay.conf";

/// I²C bus the relay board sits on.
pub const RELAY_BUS: u8 = 1;
/// 7-bit device address of the relay board.
pub const RELAY_ADDRESS: u8 = 0x10;

/// Channels watched in the received universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel driving the actuator (edge-triggered).
    pub command: Channel,
    /// Optional channel requesting host shutdown (level-triggered).
    pub shutdown: Option<Channel>,
    pub threshold: u8,
}

/// Physical sink selected for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputConfig {
    /// A single GPIO output, BCM numbering.
    Gpio { pin: u8 },
    /// One relay of an I²C relay board; the relay number is the register.
    RelayBoard { bus: u8, address: u8, relay: u8 },
}

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    pub channels: ChannelConfig,
    pub output: OutputConfig,
    /// GPIO input of the local shutdown button, if one is fitted.
    pub shutdown_button: Option<u8>,
}

// ── File layout ───────────────────────────────────────────────

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "DEFAULT")]
    section: Section,
}

#[derive(Deserialize)]
struct Section {
    channel: u16,
    #[serde(default, alias = "shutdownchannel")]
    shutdown_channel: Option<u16>,
    #[serde(default)]
    pin: Option<u8>,
    #[serde(default, alias = "relay_number")]
    relay: Option<u8>,
    #[serde(default)]
    shutdown: Option<u8>,
}

impl RelayConfig {
    /// `~/.dmx_relay.conf`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        home::home_dir()
            .map(|home| home.join(CONFIG_FILE))
            .ok_or(ConfigError::NoHome)
    }

    /// Read and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        Self::parse(&text)
    }

    /// Parse and validate config text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(&normalize_ini(text))
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_section(file.section)
    }

    fn from_section(s: Section) -> Result<Self, ConfigError> {
        let command =
            Channel::new(s.channel).ok_or(ConfigError::Invalid("channel must be within 1..=512"))?;
        let shutdown = s
            .shutdown_channel
            .map(|n| {
                Channel::new(n).ok_or(ConfigError::Invalid("shutdown_channel must be within 1..=512"))
            })
            .transpose()?;

        let output = match (s.pin, s.relay) {
            (Some(pin), None) => OutputConfig::Gpio { pin },
            (None, Some(0)) => return Err(ConfigError::Invalid("relay numbers start at 1")),
            (None, Some(relay)) => OutputConfig::RelayBoard {
                bus: RELAY_BUS,
                address: RELAY_ADDRESS,
                relay,
            },
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid("set either pin or relay, not both"));
            }
            (None, None) => return Err(ConfigError::Invalid("one of pin or relay is required")),
        };

        if let (Some(button), OutputConfig::Gpio { pin }) = (s.shutdown, output) {
            if button == pin {
                return Err(ConfigError::Invalid("shutdown button shares the output pin"));
            }
        }

        Ok(Self {
            channels: ChannelConfig {
                command,
                shutdown,
                threshold: THRESHOLD,
            },
            output,
            shutdown_button: s.shutdown,
        })
    }
}

/// Rewrite INI-only syntax into its TOML equivalent.
///
/// Keys are lowercased and `:` delimiters become `=`; `;` comment lines
/// become `#` comments.  Section headers and values pass through.
fn normalize_ini(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(comment) = trimmed.strip_prefix(';') {
            out.push('#');
            out.push_str(comment);
        } else if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            out.push_str(trimmed);
        } else {
            match trimmed.find(['=', ':']) {
                Some(at) => {
                    out.push_str(&trimmed[..at].trim().to_ascii_lowercase());
                    out.push_str(" = ");
                    out.push_str(trimmed[at + 1..].trim());
                }
                None => out.push_str(trimmed),
            }
        }
        out.push('\n');
    }
    out
}
