//! Host shutdown adapter.
//!
//! Runs `shutdown -h now` the first time a shutdown is requested.  The
//! shutdown channel is level-triggered and keeps firing while it is held
//! high, so every later request is ignored once the command has succeeded.
//! A failed command re-arms the adapter, but requests arriving within
//! [`RETRY_COOLDOWN`] of the failure are dropped so a held channel does not
//! spawn the command on every frame.

use std::process::Command;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::app::ports::{ShutdownPort, ShutdownReason};
use crate::error::ShutdownError;

/// Minimum time between a failed shutdown command and the next attempt.
pub const RETRY_COOLDOWN: Duration = Duration::from_secs(5);

pub struct HostShutdown {
    program: String,
    args: Vec<String>,
    dry_run: bool,
    retry_cooldown: Duration,
    invoked: AtomicBool,
    attempts: AtomicU32,
    failed_at: Mutex<Option<Instant>>,
}

impl HostShutdown {
    /// Halt the host with `shutdown -h now`.
    pub fn new() -> Self {
        Self::with_command("shutdown", ["-h", "now"])
    }

    /// Log requests without running anything.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::new()
        }
    }

    pub fn with_command<S: Into<String>>(program: &str, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            dry_run: false,
            retry_cooldown: RETRY_COOLDOWN,
            invoked: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
            failed_at: Mutex::new(None),
        }
    }

    pub fn with_retry_cooldown(mut self, cooldown: Duration) -> Self {
        self.retry_cooldown = cooldown;
        self
    }

    /// Whether a shutdown has already been carried out (or logged, in dry-run mode).
    pub fn is_invoked(&self) -> bool {
        self.invoked.load(Ordering::Acquire)
    }

    /// Times the command has been spawned.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    fn cooling_down(&self) -> bool {
        let failed_at = self.failed_at.lock().unwrap_or_else(PoisonError::into_inner);
        failed_at.is_some_and(|t| t.elapsed() < self.retry_cooldown)
    }

    fn rearm(&self) {
        *self.failed_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.invoked.store(false, Ordering::Release);
    }
}

impl Default for HostShutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownPort for HostShutdown {
    fn request_shutdown(&self, reason: ShutdownReason) -> Result<(), ShutdownError> {
        if self.invoked.swap(true, Ordering::AcqRel) {
            debug!("Shutdown already in progress, ignoring {:?}", reason);
            return Ok(());
        }

        if self.dry_run {
            warn!("Dry run: host shutdown requested ({:?}), not executing", reason);
            return Ok(());
        }

        if self.cooling_down() {
            self.invoked.store(false, Ordering::Release);
            debug!("Last shutdown attempt failed recently, dropping {:?}", reason);
            return Ok(());
        }

        self.attempts.fetch_add(1, Ordering::Relaxed);
        info!("Shutting down host ({:?}): {} {}", reason, self.program, self.args.join(" "));
        let status = Command::new(&self.program).args(&self.args).status().map_err(|e| {
            error!("{}: {}", self.program, e);
            self.rearm();
            ShutdownError::SpawnFailed
        })?;

        if status.success() {
            Ok(())
        } else {
            self.rearm();
            Err(ShutdownError::CommandFailed {
                code: status.code(),
            })
        }
    }
}
