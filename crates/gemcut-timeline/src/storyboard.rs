//! Storyboard import: turn generated scene descriptions into clips.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clip::{Clip, ClipProperties};
use crate::track::{find_track_by_kind, Track, TrackKind};

/// Stand-in footage for generated scenes until real media is picked.
pub const PLACEHOLDER_VIDEO_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4";

/// One generated scene. Field names match the generation service's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardSegment {
    /// Visual description of the scene
    pub description: String,
    /// Scene length in seconds (the service is asked for 2–5)
    pub duration: f64,
    /// Caption shown over the scene
    pub suggested_text: String,
}

impl StoryboardSegment {
    pub fn new(
        description: impl Into<String>,
        duration: f64,
        suggested_text: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            duration,
            suggested_text: suggested_text.into(),
        }
    }
}

fn caption_properties() -> ClipProperties {
    ClipProperties {
        opacity: Some(1.0),
        scale: Some(1.0),
        font_size: Some(40.0),
        y: Some(80.0),
        color: Some("#ffffff".to_string()),
        ..ClipProperties::default()
    }
}

fn scene_properties() -> ClipProperties {
    ClipProperties {
        opacity: Some(1.0),
        scale: Some(1.0),
        ..ClipProperties::default()
    }
}

/// Lay segments out back to back from time zero.
///
/// Each usable segment yields a placeholder video clip followed by a caption
/// clip with the same start and duration. Segments with a non-positive or
/// non-finite duration are skipped. Returns an empty list when the project
/// lacks a video or text track.
pub fn layout_storyboard(segments: &[StoryboardSegment], tracks: &[Track]) -> Vec<Clip> {
    let (Some(video), Some(text)) = (
        find_track_by_kind(tracks, TrackKind::Video),
        find_track_by_kind(tracks, TrackKind::Text),
    ) else {
        warn!("storyboard import needs a video and a text track");
        return Vec::new();
    };

    let mut clips = Vec::with_capacity(segments.len() * 2);
    let mut cursor = 0.0;
    let mut scene = 0;

    for segment in segments {
        if !(segment.duration.is_finite() && segment.duration > 0.0) {
            warn!(
                duration = segment.duration,
                "skipping storyboard segment without a usable duration"
            );
            continue;
        }
        scene += 1;

        clips.push(
            Clip::new(
                video.id,
                TrackKind::Video,
                format!("Scene {scene}"),
                cursor,
                segment.duration,
                PLACEHOLDER_VIDEO_URL,
            )
            .with_properties(scene_properties()),
        );
        clips.push(
            Clip::new(
                text.id,
                TrackKind::Text,
                "Overlay",
                cursor,
                segment.duration,
                segment.suggested_text.clone(),
            )
            .with_properties(caption_properties()),
        );

        cursor += segment.duration;
    }

    clips
}

/// Token recording the clip-list revision a generation request was made
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    pub(crate) revision: u64,
}

impl GenerationTicket {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// How a generation result was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The timeline was replaced with this many scenes.
    Applied { scenes: usize },
    /// The service answered with no usable segments; the timeline is now empty.
    Empty,
    /// The service call failed; the timeline is now empty.
    Degraded,
    /// The clip list changed after the request was issued; result dropped.
    Stale,
}
