//! Project state container.

use std::sync::Arc;

use crate::clip::{Clip, ClipId};
use crate::track::{default_tracks, find_track_by_kind, Track, TrackId, TrackKind};

/// Fixed canvas length of a project, in seconds. Playback loops back to the
/// start once the playhead passes it.
pub const DEMO_DURATION: f64 = 30.0;

/// A project: fixed tracks plus the clip list.
///
/// The clip list is copy-on-write. [`Project::snapshot`] hands out an
/// `Arc` that later edits never touch; edits go through
/// [`crate::edit::EditCommand`], which bumps [`Project::revision`] whenever
/// the list actually changes.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    tracks: Vec<Track>,
    clips: Arc<Vec<Clip>>,
    duration: f64,
    revision: u64,
}

impl Project {
    /// Create a new empty project with the default tracks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: default_tracks(),
            clips: Arc::new(Vec::new()),
            duration: DEMO_DURATION,
            revision: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracks, top lane first. Immutable for the life of the project.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Clips in insertion order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Shared handle to the current clip list.
    pub fn snapshot(&self) -> Arc<Vec<Clip>> {
        Arc::clone(&self.clips)
    }

    /// Canvas duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Counter bumped by every edit that changed the clip list.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Find a clip by id.
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Find a track by id.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// First track of the given kind.
    pub fn track_for(&self, kind: TrackKind) -> Option<&Track> {
        find_track_by_kind(&self.tracks, kind)
    }

    /// Mutable access to the clip list. Clones the list if a snapshot is
    /// still alive.
    pub(crate) fn clips_mut(&mut self) -> &mut Vec<Clip> {
        Arc::make_mut(&mut self.clips)
    }

    pub(crate) fn replace_clips(&mut self, clips: Vec<Clip>) {
        self.clips = Arc::new(clips);
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Project")
    }
}
