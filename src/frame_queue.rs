//! Single-slot frame hand-off between the receiver and the frame worker.
//!
//! The receive callback must never block on hardware, so it only drops the
//! newest frame into a [`FrameSlot`].  The worker thread takes frames out
//! and runs the controller.  A frame that arrives before the previous one
//! was taken replaces it: the consoles resend the whole universe on every
//! refresh, so only the latest state matters.
//!
//! ```text
//! ┌───────────────┐  offer()   ┌───────────┐  next_blocking()  ┌──────────────┐
//! │ receive loop  │──────────▶│ FrameSlot │──────────────────▶│ frame worker │
//! │ (main thread) │  latest    │  (Signal) │                   │  Controller  │
//! └───────────────┘  wins      └───────────┘                   └──────────────┘
//! ```

use core::sync::atomic::{AtomicU64, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::dmx::Frame;

/// Latest-wins frame slot.
///
/// A replaced frame is never evaluated.  While the worker keeps up every
/// frame is handled, and the level-triggered shutdown channel fires once
/// per frame above the threshold.  When it falls behind, replaced frames
/// raise no shutdown request, so the request count can be lower than the
/// number of such frames received; compare [`coalesced`](Self::coalesced).
pub struct FrameSlot {
    signal: Signal<CriticalSectionRawMutex, Frame>,
    offered: AtomicU64,
    coalesced: AtomicU64,
}

impl FrameSlot {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
            offered: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
        }
    }

    /// Publish `frame`, replacing any frame the worker has not taken yet.
    pub fn offer(&self, frame: Frame) {
        self.offered.fetch_add(1, Ordering::Relaxed);
        if self.signal.signaled() {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
        self.signal.signal(frame);
    }

    /// Take the pending frame, if any, without waiting.
    pub fn try_take(&self) -> Option<Frame> {
        self.signal.try_take()
    }

    /// Wait for the next frame.
    pub async fn next(&self) -> Frame {
        self.signal.wait().await
    }

    /// Block the calling thread until the next frame arrives.
    pub fn next_blocking(&self) -> Frame {
        futures_lite::future::block_on(self.next())
    }

    /// Frames offered since startup.
    pub fn offered(&self) -> u64 {
        self.offered.load(Ordering::Relaxed)
    }

    /// Frames replaced before the worker took them.  Approximate under
    /// concurrent offers.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.load(Ordering::Relaxed)
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame worker loop: take every frame from `slot` and pass it to `handle`.
///
/// Runs forever; spawn it on a dedicated thread.
pub fn run_worker(slot: &FrameSlot, mut handle: impl FnMut(&Frame)) -> ! {
    loop {
        let frame = slot.next_blocking();
        handle(&frame);
    }
}
