//! Media assets that can be placed on the timeline.

use serde::{Deserialize, Serialize};

use crate::track::TrackKind;

/// Kind of media an asset points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Audio,
}

impl AssetKind {
    /// Track kind a clip made from this asset lands on.
    pub fn track_kind(self) -> TrackKind {
        match self {
            Self::Image | Self::Video => TrackKind::Video,
            Self::Audio => TrackKind::Audio,
        }
    }

    /// Clip duration used when the asset is dropped on the timeline.
    pub fn default_duration(self) -> f64 {
        match self {
            Self::Image => 3.0,
            Self::Video | Self::Audio => 5.0,
        }
    }
}

/// A media library entry. `url` is opaque to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub kind: AssetKind,
    pub url: String,
    pub name: String,
}

impl Asset {
    /// Create a new asset.
    pub fn new(
        id: impl Into<String>,
        kind: AssetKind,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            url: url.into(),
            name: name.into(),
        }
    }
}

/// Stock assets offered by the media browser.
pub fn demo_library() -> Vec<Asset> {
    const BUCKET: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";
    vec![
        Asset::new(
            "1",
            AssetKind::Video,
            format!("{BUCKET}/BigBuckBunny.mp4"),
            "Big Buck Bunny",
        ),
        Asset::new(
            "2",
            AssetKind::Video,
            format!("{BUCKET}/ElephantsDream.mp4"),
            "Elephants Dream",
        ),
        Asset::new(
            "3",
            AssetKind::Image,
            "https://picsum.photos/800/450",
            "Random Landscape",
        ),
        Asset::new(
            "4",
            AssetKind::Image,
            "https://picsum.photos/800/451",
            "Cityscape",
        ),
    ]
}
