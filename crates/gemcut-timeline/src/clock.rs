//! Playback clock driven by host frame callbacks.
//!
//! The clock never sleeps or spawns. The host asks it to start, then calls
//! [`PlaybackClock::on_frame`] for every frame it was asked for. Each tick
//! advances the playhead by the real time measured since the previous tick,
//! so a slow frame produces a larger step rather than drifting behind.

use std::time::Instant;

use tracing::{debug, info};

/// Opaque handle for a requested frame callback.
pub type FrameHandle = u64;

/// Host-side frame scheduling, in the manner of `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a previously requested callback. Unknown or already
    /// delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// In-process frame queue for hosts that run their own loop.
///
/// Requests accumulate until the loop drains them with [`FrameQueue::take_due`].
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_handle: FrameHandle,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every outstanding request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// True when nothing is waiting for a frame.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.pending.push(self.next_handle);
        self.next_handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}

/// Result of delivering one frame to the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockTick {
    /// Not playing, or the frame was not the one the clock is waiting for.
    Idle,
    /// The playhead moved forward by `delta` seconds.
    Advanced { time: f64, delta: f64 },
    /// The playhead ran past the end; playback stopped and rewound to 0.
    Wrapped,
}

/// Current time plus the playing flag.
#[derive(Debug)]
pub struct PlaybackClock {
    current_time: f64,
    playing: bool,
    /// Playback stops and rewinds once the playhead passes this point.
    loop_at: f64,
    last_tick: Option<Instant>,
    pending: Option<FrameHandle>,
}

impl PlaybackClock {
    /// Create a paused clock at time zero.
    pub fn new(loop_at: f64) -> Self {
        Self {
            current_time: 0.0,
            playing: false,
            loop_at,
            last_tick: None,
            pending: None,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn loop_at(&self) -> f64 {
        self.loop_at
    }

    /// Handle of the frame the clock is waiting for, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Start playing from the current time. No-op if already playing.
    pub fn play<S: FrameScheduler>(&mut self, scheduler: &mut S, now: Instant) {
        if self.playing {
            return;
        }
        info!(time = self.current_time, "playback started");
        self.playing = true;
        self.last_tick = Some(now);
        self.pending = Some(scheduler.request_frame());
    }

    /// Stop playing and withdraw the pending frame. Safe to call repeatedly.
    pub fn pause<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if self.playing {
            info!(time = self.current_time, "playback paused");
        }
        self.playing = false;
        self.last_tick = None;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Flip between playing and paused.
    pub fn toggle<S: FrameScheduler>(&mut self, scheduler: &mut S, now: Instant) {
        if self.playing {
            self.pause(scheduler);
        } else {
            self.play(scheduler, now);
        }
    }

    /// Move the playhead. Clamped to `[0, loop_at]`; non-finite input is
    /// ignored. Does not change the playing flag.
    pub fn seek(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        self.current_time = time.clamp(0.0, self.loop_at);
        debug!(time = self.current_time, "seek");
    }

    /// Deliver a frame callback.
    ///
    /// Frames other than the one the clock is waiting for are ignored, so a
    /// callback that races a pause cannot move the playhead.
    pub fn on_frame<S: FrameScheduler>(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut S,
        now: Instant,
    ) -> ClockTick {
        if self.pending != Some(handle) {
            return ClockTick::Idle;
        }
        self.pending = None;

        if !self.playing {
            return ClockTick::Idle;
        }

        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let next = self.current_time + delta;
        if next > self.loop_at {
            info!(loop_at = self.loop_at, "reached end of canvas, rewinding");
            self.playing = false;
            self.last_tick = None;
            self.current_time = 0.0;
            return ClockTick::Wrapped;
        }

        self.current_time = next;
        self.pending = Some(scheduler.request_frame());
        ClockTick::Advanced { time: next, delta }
    }
}
