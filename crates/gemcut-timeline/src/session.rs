//! Editing session: the single owner of project and playback state.
//!
//! UI layers read derived views (active clips, composite frame, ruler) from
//! the session and change state only through its methods.

use std::fmt::Display;
use std::time::Instant;

use tracing::{info, warn};

use crate::asset::Asset;
use crate::clip::{Clip, ClipId, ClipPatch, ClipProperties};
use crate::clock::{ClockTick, FrameHandle, FrameScheduler, PlaybackClock};
use crate::compositor::{compose, CompositeFrame};
use crate::edit::EditCommand;
use crate::index::{active_clips, ruler_markers, RulerMarker, DEFAULT_ZOOM};
use crate::project::Project;
use crate::storyboard::{layout_storyboard, GenerationTicket, ImportOutcome, StoryboardSegment};
use crate::track::TrackKind;

/// Duration of a freshly added caption.
pub const TEXT_CLIP_DURATION: f64 = 3.0;

/// Characters of the caption used as the clip's display name.
const TEXT_NAME_CHARS: usize = 10;

/// Project plus playhead, zoom and selection.
#[derive(Debug)]
pub struct EditorSession {
    project: Project,
    clock: PlaybackClock,
    zoom: f64,
    selected: Option<ClipId>,
}

impl EditorSession {
    /// Start a session on `project`, paused at time zero.
    pub fn new(project: Project) -> Self {
        let clock = PlaybackClock::new(project.duration());
        Self {
            project,
            clock,
            zoom: DEFAULT_ZOOM,
            selected: None,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn clips(&self) -> &[Clip] {
        self.project.clips()
    }

    // ── Playback ────────────────────────────────────────────────

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn play<S: FrameScheduler>(&mut self, scheduler: &mut S, now: Instant) {
        self.clock.play(scheduler, now);
    }

    pub fn pause<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.clock.pause(scheduler);
    }

    pub fn toggle_playback<S: FrameScheduler>(&mut self, scheduler: &mut S, now: Instant) {
        self.clock.toggle(scheduler, now);
    }

    /// Deliver a host frame callback to the clock.
    pub fn on_frame<S: FrameScheduler>(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut S,
        now: Instant,
    ) -> ClockTick {
        self.clock.on_frame(handle, scheduler, now)
    }

    pub fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    // ── View ────────────────────────────────────────────────────

    /// Pixels per second on the timeline.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            warn!(zoom, "ignoring invalid zoom");
        }
    }

    /// Clips live at the playhead.
    pub fn active_clips(&self) -> Vec<&Clip> {
        active_clips(self.project.clips(), self.current_time())
    }

    /// Preview picture at the playhead.
    pub fn compose(&self) -> CompositeFrame<'_> {
        compose(self.project.clips(), self.current_time())
    }

    /// Ruler ticks for the current zoom.
    pub fn ruler(&self) -> Vec<RulerMarker> {
        ruler_markers(self.project.duration(), self.zoom)
    }

    // ── Selection ───────────────────────────────────────────────

    /// Select a clip, or clear the selection with `None`. Selecting an
    /// unknown id clears the selection.
    pub fn select_clip(&mut self, id: Option<ClipId>) {
        self.selected = id.filter(|id| self.project.clip(*id).is_some());
    }

    pub fn selected_id(&self) -> Option<ClipId> {
        self.selected
    }

    /// First clip matching the selection, if any.
    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selected.and_then(|id| self.project.clip(id))
    }

    // ── Clip mutation ───────────────────────────────────────────

    /// Place an asset on its track at `at_time`. Returns the new clip's id,
    /// or `None` when the project has no matching track.
    pub fn add_media_clip(&mut self, asset: &Asset, at_time: f64) -> Option<ClipId> {
        let kind = asset.kind.track_kind();
        let track = self.project.track_for(kind)?;
        let clip = Clip::new(
            track.id,
            kind,
            asset.name.clone(),
            at_time,
            asset.kind.default_duration(),
            asset.url.clone(),
        )
        .with_properties(ClipProperties::media_defaults());
        self.add_clip(clip)
    }

    /// Place a caption on the text track at `at_time`.
    pub fn add_text_clip(&mut self, text: &str, at_time: f64) -> Option<ClipId> {
        let track = self.project.track_for(TrackKind::Text)?;
        let name: String = text.chars().take(TEXT_NAME_CHARS).collect();
        let clip = Clip::new(
            track.id,
            TrackKind::Text,
            name,
            at_time,
            TEXT_CLIP_DURATION,
            text,
        )
        .with_properties(ClipProperties::text_defaults());
        self.add_clip(clip)
    }

    fn add_clip(&mut self, clip: Clip) -> Option<ClipId> {
        let id = clip.id;
        EditCommand::AddClip(clip)
            .apply(&mut self.project)
            .then_some(id)
    }

    /// Merge `patch` into a clip. Unknown ids are ignored. Returns whether
    /// the clip changed.
    pub fn update_clip(&mut self, id: ClipId, patch: ClipPatch) -> bool {
        EditCommand::UpdateClip { id, patch }.apply(&mut self.project)
    }

    /// Remove a clip, clearing the selection if it pointed at it. Unknown
    /// ids are ignored.
    pub fn delete_clip(&mut self, id: ClipId) -> bool {
        let removed = EditCommand::DeleteClip { id }.apply(&mut self.project);
        if removed && self.selected == Some(id) {
            self.selected = None;
        }
        removed
    }

    // ── Storyboard ──────────────────────────────────────────────

    /// Replace the whole timeline with a storyboard and rewind to zero.
    /// Returns the number of scenes placed.
    pub fn import_storyboard(&mut self, segments: &[StoryboardSegment]) -> usize {
        let clips = layout_storyboard(segments, self.project.tracks());
        let scenes = clips.len() / 2;
        EditCommand::ReplaceClips(clips).apply(&mut self.project);
        self.selected = None;
        self.clock.seek(0.0);
        info!(scenes, "storyboard imported");
        scenes
    }

    /// Issue a ticket for a generation request about to be sent.
    pub fn begin_generation(&self) -> GenerationTicket {
        GenerationTicket {
            revision: self.project.revision(),
        }
    }

    /// Apply the result of a generation request.
    ///
    /// Results for a ticket whose revision no longer matches the project are
    /// dropped. A failed call degrades to an empty timeline.
    pub fn finish_generation<E: Display>(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Vec<StoryboardSegment>, E>,
    ) -> ImportOutcome {
        if ticket.revision != self.project.revision() {
            info!(
                ticket = ticket.revision,
                current = self.project.revision(),
                "discarding stale storyboard"
            );
            return ImportOutcome::Stale;
        }

        match result {
            // A list with no usable durations leaves nothing to play.
            Ok(segments) => match self.import_storyboard(&segments) {
                0 => ImportOutcome::Empty,
                scenes => ImportOutcome::Applied { scenes },
            },
            Err(e) => {
                warn!(error = %e, "storyboard generation failed");
                self.import_storyboard(&[]);
                ImportOutcome::Degraded
            }
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Project::default())
    }
}
