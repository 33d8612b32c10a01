//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a track.
pub type TrackId = Uuid;

/// Kind of track. A clip's kind always mirrors its track's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Overlay,
}

impl TrackKind {
    /// Display label for headers and inspector titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Text => "Text",
            Self::Overlay => "Overlay",
        }
    }
}

/// A fixed lane on the timeline.
///
/// Tracks do not own their clips; clips refer back to a track by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track kind
    pub kind: TrackKind,
    /// Track name
    pub name: String,
    /// Is track muted
    pub muted: bool,
    /// Is track hidden from the preview
    pub hidden: bool,
}

impl Track {
    /// Create a new track of the given kind.
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            muted: false,
            hidden: false,
        }
    }

    /// Create a new text track.
    pub fn new_text(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Text, name)
    }

    /// Create a new video track.
    pub fn new_video(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Video, name)
    }

    /// Create a new audio track.
    pub fn new_audio(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Audio, name)
    }
}

/// The three lanes every project starts with, top to bottom.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new_text("Text Layer"),
        Track::new_video("Video Track Main"),
        Track::new_audio("Background Music"),
    ]
}

/// First track of the given kind.
pub fn find_track_by_kind(tracks: &[Track], kind: TrackKind) -> Option<&Track> {
    tracks.iter().find(|t| t.kind == kind)
}
