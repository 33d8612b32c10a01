//! Integration tests for the playback clock driving the compositor.

use std::time::{Duration, Instant};

use gemcut_timeline::{
    compose, demo_library, Asset, AssetKind, ClipPatch, ClockTick, EditorSession, FrameQueue,
    MediaElement, PlayerSync, Signal, DEMO_DURATION,
};

// ── Helpers ────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RecordingMedia {
    source: Option<String>,
    position: f64,
    playing: bool,
    loads: Vec<String>,
}

impl MediaElement for RecordingMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.loads.push(source.to_string());
        self.position = 0.0;
    }
    fn unload(&mut self) {
        self.source = None;
    }
    fn position(&self) -> f64 {
        self.position
    }
    fn seek(&mut self, position: f64) {
        self.position = position;
    }
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn is_paused(&self) -> bool {
        !self.playing
    }
}

/// Deliver frames `step` apart until `total` has elapsed.
fn drive(
    session: &mut EditorSession,
    queue: &mut FrameQueue,
    start: Instant,
    step: Duration,
    total: Duration,
) -> Vec<ClockTick> {
    let mut ticks = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        elapsed += step;
        for handle in queue.take_due() {
            ticks.push(session.on_frame(handle, queue, start + elapsed));
        }
    }
    ticks
}

// ── Clock ──────────────────────────────────────────────────────

#[test]
fn clock_tracks_elapsed_time() {
    let mut session = EditorSession::default();
    let mut queue = FrameQueue::new();
    let start = Instant::now();

    session.play(&mut queue, start);
    let step = Duration::from_millis(20);
    drive(&mut session, &mut queue, start, step, Duration::from_secs(12));

    assert!(session.is_playing());
    assert!((session.current_time() - 12.0).abs() < 1e-6);
}

#[test]
fn clock_rewinds_after_canvas_end() {
    let mut session = EditorSession::default();
    let mut queue = FrameQueue::new();
    let start = Instant::now();

    session.play(&mut queue, start);
    let step = Duration::from_millis(500);
    let ticks = drive(&mut session, &mut queue, start, step, Duration::from_secs(31));

    assert_eq!(ticks.last(), Some(&ClockTick::Wrapped));
    assert!(!session.is_playing());
    assert_eq!(session.current_time(), 0.0);
    assert!(queue.is_idle());
    assert_eq!(session.clock().loop_at(), DEMO_DURATION);
}

#[test]
fn toggle_pauses_and_resumes() {
    let mut session = EditorSession::default();
    let mut queue = FrameQueue::new();
    let start = Instant::now();

    session.toggle_playback(&mut queue, start);
    let step = Duration::from_millis(100);
    drive(&mut session, &mut queue, start, step, Duration::from_secs(1));
    session.toggle_playback(&mut queue, start);
    assert!(!session.is_playing());
    assert!(queue.is_idle());

    let paused_at = session.current_time();
    session.seek(paused_at + 3.0);
    assert!(!session.is_playing());
    assert!((session.current_time() - (paused_at + 3.0)).abs() < 1e-9);
}

// ── Clock + compositor ─────────────────────────────────────────

#[test]
fn media_follows_the_playhead_across_clips() {
    let mut session = EditorSession::default();
    let library = demo_library();
    session.add_media_clip(&library[0], 0.0);
    session.add_media_clip(&library[1], 5.0);

    let mut queue = FrameQueue::new();
    let mut sync = PlayerSync::new();
    let mut media = RecordingMedia::default();
    let start = Instant::now();
    let step = Duration::from_millis(100);

    session.play(&mut queue, start);
    let mut now = start;
    let mut signals = Vec::new();
    while now < start + Duration::from_secs(11) {
        now += step;
        for handle in queue.take_due() {
            if let ClockTick::Advanced { delta, .. } = session.on_frame(handle, &mut queue, now) {
                media.position += delta;
            }
        }
        let frame = compose(session.clips(), session.current_time());
        let report = sync.sync(&frame, session.is_playing(), &mut media);
        if signals.last() != Some(&report.signal) {
            signals.push(report.signal);
        }
    }

    let ids: Vec<_> = session.clips().iter().map(|c| c.id).collect();
    assert_eq!(
        signals,
        [
            Signal::Live { clip: ids[0] },
            Signal::Live { clip: ids[1] },
            Signal::NoSignal,
        ]
    );
    assert_eq!(media.loads, [library[0].url.clone(), library[1].url.clone()]);
    assert!(media.source.is_none());
}

#[test]
fn editing_mounted_clip_source_reloads_media() {
    let mut session = EditorSession::default();
    let asset = Asset::new("a", AssetKind::Video, "a.mp4", "A");
    let id = session.add_media_clip(&asset, 0.0).unwrap();
    session.seek(1.0);

    let mut sync = PlayerSync::new();
    let mut media = RecordingMedia::default();
    sync.sync(&session.compose(), false, &mut media);
    assert_eq!(media.source.as_deref(), Some("a.mp4"));

    assert!(session.update_clip(id, ClipPatch::content("b.mp4")));
    let report = sync.sync(&session.compose(), false, &mut media);

    assert!(report.loaded);
    assert_eq!(report.signal, Signal::Live { clip: id });
    assert_eq!(media.source.as_deref(), Some("b.mp4"));
    assert_eq!(media.position, 1.0);
    assert_eq!(media.loads, ["a.mp4", "b.mp4"]);
}
