//! Preview compositor.
//!
//! [`compose`] picks what the preview shows at one instant: at most one
//! primary video clip plus every live text overlay. [`PlayerSync`] then
//! keeps a host media element in step with that picture.

use gemcut_core::{Color, Rect, Vec2};
use tracing::{debug, trace};

use crate::clip::{Clip, ClipId, ResolvedProperties};
use crate::index::active_clips;
use crate::track::TrackKind;

/// Largest tolerated gap, in seconds, between the media element's position
/// and the expected source time before a seek is forced.
pub const DRIFT_TOLERANCE: f64 = 0.3;

/// The video clip that owns the media element.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryLayer<'a> {
    pub clip: &'a Clip,
    /// Position inside the source media that should be on screen
    pub source_time: f64,
    pub properties: ResolvedProperties,
}

/// A text clip drawn over the picture.
#[derive(Debug, Clone, Copy)]
pub struct TextOverlay<'a> {
    pub clip: &'a Clip,
    pub properties: ResolvedProperties,
}

impl TextOverlay<'_> {
    pub fn text(&self) -> &str {
        &self.clip.content
    }

    /// Center point of the overlay inside `frame`.
    pub fn anchor(&self, frame: Rect) -> Vec2 {
        frame.point_at_percent(self.properties.x, self.properties.y)
    }

    /// Font size after the clip's scale is applied.
    pub fn scaled_font_size(&self) -> f32 {
        self.properties.font_size * self.properties.scale
    }

    /// Text color with the clip's opacity folded into alpha.
    pub fn fill(&self) -> Color {
        self.properties.color.with_opacity(self.properties.opacity)
    }
}

/// What the preview shows at one instant.
#[derive(Debug, Clone)]
pub struct CompositeFrame<'a> {
    pub time: f64,
    pub primary: Option<PrimaryLayer<'a>>,
    /// Overlays in clip-list order; later entries draw on top
    pub overlays: Vec<TextOverlay<'a>>,
}

impl CompositeFrame<'_> {
    /// True when no video clip is live and the preview shows "no signal".
    pub fn is_no_signal(&self) -> bool {
        self.primary.is_none()
    }
}

/// Build the preview picture for `time`.
///
/// The primary layer is the first live video clip in list order; other
/// overlapping video clips are not shown.
pub fn compose(clips: &[Clip], time: f64) -> CompositeFrame<'_> {
    let active = active_clips(clips, time);

    let primary = active
        .iter()
        .copied()
        .find(|c| c.kind == TrackKind::Video)
        .map(|clip| PrimaryLayer {
            clip,
            source_time: clip.source_time_at(time),
            properties: clip.properties.resolve(),
        });

    let overlays = active
        .iter()
        .copied()
        .filter(|c| c.kind == TrackKind::Text)
        .map(|clip| TextOverlay {
            clip,
            properties: clip.properties.resolve(),
        })
        .collect();

    CompositeFrame {
        time,
        primary,
        overlays,
    }
}

/// Host-supplied media playback element (a `<video>` tag, a decoder, …).
pub trait MediaElement {
    /// Point the element at a new source.
    fn load(&mut self, source: &str);
    /// Drop the current source.
    fn unload(&mut self);
    /// Current playback position inside the source, in seconds.
    fn position(&self) -> f64;
    fn seek(&mut self, position: f64);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
}

/// Preview signal state after a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Live { clip: ClipId },
    NoSignal,
}

/// What [`PlayerSync::sync`] did to the media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncReport {
    pub signal: Signal,
    /// A new source was loaded
    pub loaded: bool,
    /// Drift exceeded the tolerance and the element was seeked here
    pub seeked_to: Option<f64>,
}

/// Keeps one media element matched to the composite frame.
#[derive(Debug, Default)]
pub struct PlayerSync {
    mounted: Option<ClipId>,
    source: Option<String>,
}

impl PlayerSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip whose media is currently mounted.
    pub fn mounted(&self) -> Option<ClipId> {
        self.mounted
    }

    /// Bring `media` in line with `frame` and the clock's playing flag.
    pub fn sync<M: MediaElement>(
        &mut self,
        frame: &CompositeFrame<'_>,
        playing: bool,
        media: &mut M,
    ) -> SyncReport {
        let Some(primary) = frame.primary else {
            if self.mounted.take().is_some() {
                debug!("no primary clip, unmounting media");
                media.pause();
                media.unload();
                self.source = None;
            }
            return SyncReport {
                signal: Signal::NoSignal,
                loaded: false,
                seeked_to: None,
            };
        };

        let clip = primary.clip;
        // The source follows the clip's content, so an edited URL reloads
        // even while the same clip stays mounted.
        let loaded = self.source.as_deref() != Some(clip.content.as_str());
        if loaded {
            debug!(clip = %clip.id, source = %clip.content, "loading media");
            media.load(&clip.content);
            self.source = Some(clip.content.clone());
        }
        self.mounted = Some(clip.id);

        let expected = primary.source_time;
        let drift = (media.position() - expected).abs();
        let seeked_to = if loaded || drift > DRIFT_TOLERANCE {
            trace!(expected, drift, "seeking media");
            media.seek(expected);
            Some(expected)
        } else {
            None
        };

        if playing && media.is_paused() {
            media.play();
        } else if !playing && !media.is_paused() {
            media.pause();
        }

        SyncReport {
            signal: Signal::Live { clip: clip.id },
            loaded,
            seeked_to,
        }
    }
}
