//! Command line of the `dmxrelay` binary.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::RelayConfig;
use crate::error::ConfigError;

/// Highest universe number an E1.31 source may transmit.
pub const MAX_UNIVERSE: u16 = 63999;

#[derive(Debug, Parser)]
#[command(
    name = "dmxrelay",
    about = "Drive a relay or GPIO output from one DMX channel",
    version
)]
pub struct Cli {
    /// Universe number
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_UNIVERSE))
    )]
    pub universe: u16,

    /// Config file (default: ~/.dmx_relay.conf)
    #[arg(short, long, env = "DMX_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log shutdown requests instead of halting the host
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The explicit `--config` path, or the file in the home directory.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => RelayConfig::default_path(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
