//! Headless playback host.
//!
//! Stands in for a browser: a tokio interval plays the role of the display
//! refresh, [`FrameQueue`] collects the clock's frame requests, and
//! [`HeadlessMedia`] pretends to be the `<video>` element.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use gemcut_core::{format_clock, Rect};
use gemcut_timeline::{
    ClipId, ClockTick, EditorSession, FrameQueue, MediaElement, PlayerSync, Signal,
};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Preview surface size used for overlay placement in logs.
const PREVIEW: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

/// Frame callback rate is clamped into this range.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// Media element that tracks position without decoding anything.
#[derive(Debug)]
pub struct HeadlessMedia {
    source: Option<String>,
    position: f64,
    paused: bool,
    loads: usize,
}

impl HeadlessMedia {
    pub fn new() -> Self {
        Self {
            source: None,
            position: 0.0,
            paused: true,
            loads: 0,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Number of sources loaded so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Let `elapsed` seconds of media play out.
    pub fn advance(&mut self, elapsed: f64) {
        if !self.paused && self.source.is_some() {
            self.position += elapsed;
        }
    }
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for HeadlessMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.position = 0.0;
        self.paused = true;
        self.loads += 1;
    }

    fn unload(&mut self) {
        self.source = None;
        self.position = 0.0;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, position: f64) {
        self.position = position.max(0.0);
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Summary of one headless playback run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSummary {
    /// Frames the clock advanced on
    pub frames: u64,
    /// Forced seeks issued to the media element
    pub seeks: u64,
    /// Playback ran off the end of the canvas and rewound
    pub wrapped: bool,
    pub final_time: f64,
}

/// Play `session` for up to `seconds` of wall time at `fps` callbacks per
/// second, keeping `media` in sync.
///
/// `fps` is clamped to [`MIN_FPS`]..=[`MAX_FPS`]. Negative or NaN `seconds`
/// play nothing; a budget too large for a [`Duration`] is an error.
pub async fn run_playback(
    session: &mut EditorSession,
    media: &mut HeadlessMedia,
    fps: u32,
    seconds: f64,
) -> Result<PlaybackSummary> {
    let budget = Duration::try_from_secs_f64(seconds.max(0.0))
        .with_context(|| format!("invalid playback length: {seconds} s"))?;
    let period = Duration::from_secs(1) / fps.clamp(MIN_FPS, MAX_FPS);

    let mut queue = FrameQueue::new();
    let mut sync = PlayerSync::new();
    let mut summary = PlaybackSummary {
        frames: 0,
        seeks: 0,
        wrapped: false,
        final_time: session.current_time(),
    };

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = Instant::now();
    let mut shown: Option<ClipId> = None;
    let mut captions: Vec<String> = Vec::new();

    session.play(&mut queue, started);
    // Bring the element up to the starting frame before the first tick.
    sync.sync(&session.compose(), session.is_playing(), media);

    while session.is_playing() && started.elapsed() < budget {
        interval.tick().await;
        let now = Instant::now();

        for handle in queue.take_due() {
            match session.on_frame(handle, &mut queue, now) {
                ClockTick::Advanced { delta, .. } => {
                    summary.frames += 1;
                    media.advance(delta);
                }
                ClockTick::Wrapped => summary.wrapped = true,
                ClockTick::Idle => {}
            }
        }

        let frame = session.compose();
        let report = sync.sync(&frame, session.is_playing(), media);
        if report.seeked_to.is_some() {
            summary.seeks += 1;
        }

        let live = match report.signal {
            Signal::Live { clip } => Some(clip),
            Signal::NoSignal => None,
        };
        if live != shown {
            match frame.primary {
                Some(primary) => info!(
                    at = %format_clock(frame.time),
                    clip = %primary.clip.name,
                    source = %primary.clip.content,
                    "preview switched"
                ),
                None => info!(at = %format_clock(frame.time), "no signal"),
            }
            shown = live;
        }

        let visible: Vec<String> = frame.overlays.iter().map(|o| o.text().to_string()).collect();
        if visible != captions {
            for overlay in &frame.overlays {
                let anchor = overlay.anchor(PREVIEW);
                info!(
                    text = overlay.text(),
                    x = anchor.x,
                    y = anchor.y,
                    size = overlay.scaled_font_size(),
                    color = %overlay.fill().to_hex(),
                    "caption"
                );
            }
            captions = visible;
        }

        debug!(time = frame.time, media = media.position(), "frame");
    }

    session.pause(&mut queue);
    sync.sync(&session.compose(), false, media);
    summary.final_time = session.current_time();
    info!(
        frames = summary.frames,
        seeks = summary.seeks,
        wrapped = summary.wrapped,
        at = %format_clock(summary.final_time),
        "playback finished"
    );
    Ok(summary)
}
