//! Timeline index: which clips are live at a time, and the mapping between
//! timeline pixels and seconds.
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! every query.

use gemcut_core::{Rect, Vec2};

use crate::clip::{Clip, ClipId};
use crate::track::{Track, TrackId};

/// Default zoom in pixels per second.
pub const DEFAULT_ZOOM: f64 = 40.0;

/// Zoom level at or above which ruler markers are drawn every second.
pub const FINE_MARKER_ZOOM: f64 = 20.0;

/// The ruler always covers at least this many seconds.
pub const MIN_RULER_SECONDS: f64 = 60.0;

/// Every clip whose active window contains `time`, in input order.
pub fn active_clips(clips: &[Clip], time: f64) -> Vec<&Clip> {
    clips.iter().filter(|c| c.is_active_at(time)).collect()
}

/// Clips owned by one track, in input order.
pub fn clips_on_track(clips: &[Clip], track_id: TrackId) -> impl Iterator<Item = &Clip> {
    clips.iter().filter(move |c| c.track_id == track_id)
}

/// Convert a pixel offset from the lane origin into seconds.
///
/// Negative offsets clamp to zero. A non-positive zoom maps everything to 0.
#[inline]
pub fn pixel_to_time(pixel_offset: f64, zoom: f64) -> f64 {
    if zoom > 0.0 {
        (pixel_offset / zoom).max(0.0)
    } else {
        0.0
    }
}

/// Convert seconds into a pixel offset from the lane origin.
#[inline]
pub fn time_to_pixel(time: f64, zoom: f64) -> f64 {
    time * zoom
}

/// Spacing of ruler markers in whole seconds.
pub fn marker_step(zoom: f64) -> u32 {
    if zoom >= FINE_MARKER_ZOOM {
        1
    } else {
        5
    }
}

/// A tick on the time ruler.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerMarker {
    pub seconds: u32,
    /// Offset from the lane origin
    pub x: f64,
    pub label: String,
}

/// Ruler ticks from 0 to `max(duration, 60)` inclusive.
pub fn ruler_markers(duration: f64, zoom: f64) -> Vec<RulerMarker> {
    let end = if duration.is_finite() {
        duration.max(MIN_RULER_SECONDS)
    } else {
        MIN_RULER_SECONDS
    };
    (0u32..)
        .step_by(marker_step(zoom) as usize)
        .take_while(|&s| f64::from(s) <= end)
        .map(|seconds| RulerMarker {
            seconds,
            x: time_to_pixel(f64::from(seconds), zoom),
            label: format!("{seconds}s"),
        })
        .collect()
}

/// What a pointer position on the timeline resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineHit {
    /// The ruler was clicked; seek to this time.
    Ruler { time: f64 },
    /// A clip body was clicked.
    Clip { id: ClipId },
    /// Empty lane space was clicked; seek to this time.
    Lane { track_id: TrackId, time: f64 },
    /// Outside every lane (track headers or below the last lane).
    Outside,
}

/// Pixel geometry of the timeline panel.
///
/// Coordinates passed in are relative to the panel's top-left corner: the
/// track header column occupies the first `header_width` pixels and the
/// ruler the first `ruler_height` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    pub header_width: f32,
    pub ruler_height: f32,
    pub track_height: f32,
    /// Vertical inset of a clip body inside its lane
    pub clip_inset: f32,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            header_width: 200.0,
            ruler_height: 32.0,
            track_height: 64.0,
            clip_inset: 8.0,
        }
    }
}

impl TimelineLayout {
    /// Seek target for a click at panel x-coordinate `x`.
    pub fn seek_time(&self, x: f32, zoom: f64) -> f64 {
        pixel_to_time(f64::from(x - self.header_width), zoom)
    }

    /// Rectangle of a clip body, relative to the lanes' origin.
    pub fn clip_rect(&self, clip: &Clip, lane: usize, zoom: f64) -> Rect {
        Rect::new(
            time_to_pixel(clip.start_time, zoom) as f32,
            lane as f32 * self.track_height + self.clip_inset,
            time_to_pixel(clip.duration, zoom) as f32,
            self.track_height - 2.0 * self.clip_inset,
        )
    }

    /// Resolve a click at panel coordinates `point`.
    ///
    /// Where clip bodies overlap, the one later in the list wins, since it
    /// is drawn on top.
    pub fn hit_test(
        &self,
        tracks: &[Track],
        clips: &[Clip],
        point: Vec2,
        zoom: f64,
    ) -> TimelineHit {
        if point.x < self.header_width {
            return TimelineHit::Outside;
        }
        if point.y < self.ruler_height {
            return TimelineHit::Ruler {
                time: self.seek_time(point.x, zoom),
            };
        }

        let local = Vec2::new(point.x - self.header_width, point.y - self.ruler_height);
        let lane = (local.y / self.track_height).floor() as usize;
        let Some(track) = tracks.get(lane) else {
            return TimelineHit::Outside;
        };

        let hit = clips_on_track(clips, track.id)
            .filter(|clip| self.clip_rect(clip, lane, zoom).contains(local))
            .last();

        match hit {
            Some(clip) => TimelineHit::Clip { id: clip.id },
            None => TimelineHit::Lane {
                track_id: track.id,
                time: self.seek_time(point.x, zoom),
            },
        }
    }
}
