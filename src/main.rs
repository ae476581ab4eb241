//! DmxRelay: Main Entry Point
//!
//! Hexagonal architecture: the receive loop only hands frames over, the
//! frame worker owns the output and runs the domain logic.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SacnFrameSource   OutputDispatcher   HostShutdown   LogEventSink│
//! │  (FrameSource)     (OutputPort)       (ShutdownPort) (EventSink) │
//! │  ButtonPin (EdgeInput)                                         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │             RelayService (pure logic)                  │    │
//! │  │  ChannelMonitor (Edge) · ChannelMonitor (Level)        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Threads: main (receive) · frame-worker · shutdown-button      │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dmxrelay::adapters::host_shutdown::HostShutdown;
use dmxrelay::adapters::log_sink::LogEventSink;
use dmxrelay::adapters::output::OutputDispatcher;
use dmxrelay::adapters::rpi;
use dmxrelay::adapters::sacn_source::SacnFrameSource;
use dmxrelay::app::controller::Controller;
use dmxrelay::app::ports::FrameSource;
use dmxrelay::cli::Cli;
use dmxrelay::config::RelayConfig;
use dmxrelay::drivers::button::ShutdownButton;
use dmxrelay::frame_queue::{self, FrameSlot};

fn main() -> Result<()> {
    // ── 1. CLI + logging ──────────────────────────────────────
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    info!("╔══════════════════════════════════════╗");
    info!("║  DmxRelay v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let path = cli.config_path()?;
    let config =
        RelayConfig::load(&path).with_context(|| format!("loading {}", path.display()))?;
    info!("Using universe n°{}", cli.universe);
    info!("Listening on DMX channel n°{}", config.channels.command);
    if let Some(ch) = config.channels.shutdown {
        info!("Listening on shutdown channel n°{}", ch);
    }

    // ── 3. Host shutdown + button ─────────────────────────────
    let host = Arc::new(if cli.dry_run {
        HostShutdown::dry_run()
    } else {
        HostShutdown::new()
    });

    if let Some(pin) = config.shutdown_button {
        let input = rpi::ButtonPin::open(pin)
            .with_context(|| format!("opening shutdown button on GPIO {pin}"))?;
        ShutdownButton::new(input, pin, host.clone())
            .spawn()
            .context("spawning shutdown button watcher")?;
    }

    // ── 4. Output sink ────────────────────────────────────────
    let output = OutputDispatcher::from_config(
        config.output,
        |pin| rpi::output_pin(pin).with_context(|| format!("opening GPIO {pin}")),
        |bus| rpi::i2c_bus(bus).with_context(|| format!("opening I2C bus {bus}")),
    )?;
    info!("Output: {}", output);

    // ── 5. Frame worker ───────────────────────────────────────
    let slot = Arc::new(FrameSlot::new());
    let mut controller = Controller::new(config.channels, output, host, LogEventSink::new());
    {
        let slot = slot.clone();
        std::thread::Builder::new()
            .name("frame-worker".into())
            .spawn(move || {
                frame_queue::run_worker(&slot, |frame| {
                    controller.on_frame(frame);
                });
            })
            .context("spawning frame worker")?;
    }

    // ── 6. Receive loop ───────────────────────────────────────
    let mut source = SacnFrameSource::bind()?;
    source.register_universe(cli.universe, {
        let slot = slot.clone();
        move |frame| slot.offer(frame)
    })?;

    info!("System ready. Entering receive loop.");
    let result = source.run();
    warn!(
        "Receive loop ended after {} frames ({} coalesced)",
        slot.offered(),
        slot.coalesced()
    );
    result?;
    Ok(())
}
