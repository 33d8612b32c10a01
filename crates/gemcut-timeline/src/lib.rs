//! GemCut Timeline - Timeline model and playback
//!
//! Implements the editing core:
//! - Tracks, clips and media assets
//! - Edit commands over a copy-on-write clip list
//! - Timeline index (active clips, pixel/time mapping, ruler, hit testing)
//! - Frame-driven playback clock
//! - Preview compositor and media element sync
//! - Storyboard import
//! - The editor session that owns all of the above

pub mod asset;
pub mod clip;
pub mod clock;
pub mod compositor;
pub mod edit;
pub mod index;
pub mod project;
pub mod session;
pub mod storyboard;
pub mod track;

pub use asset::{demo_library, Asset, AssetKind};
pub use clip::{Clip, ClipId, ClipPatch, ClipProperties, ResolvedProperties};
pub use clock::{ClockTick, FrameHandle, FrameQueue, FrameScheduler, PlaybackClock};
pub use compositor::{
    compose, CompositeFrame, MediaElement, PlayerSync, PrimaryLayer, Signal, SyncReport,
    TextOverlay, DRIFT_TOLERANCE,
};
pub use edit::EditCommand;
pub use index::{
    active_clips, pixel_to_time, ruler_markers, time_to_pixel, RulerMarker, TimelineHit,
    TimelineLayout,
};
pub use project::{Project, DEMO_DURATION};
pub use session::EditorSession;
pub use storyboard::{
    layout_storyboard, GenerationTicket, ImportOutcome, StoryboardSegment, PLACEHOLDER_VIDEO_URL,
};
pub use track::{Track, TrackId, TrackKind};
