//! Clip types for the timeline.

use gemcut_core::{Color, TimeRange};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::track::{TrackId, TrackKind};

/// Identifier of a clip.
pub type ClipId = Uuid;

/// Optional visual attributes of a clip.
///
/// Every field may be absent; renderers go through [`ClipProperties::resolve`]
/// which substitutes the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipProperties {
    /// 0.0 (transparent) to 1.0 (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Uniform scale factor, > 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Horizontal center in percent of frame width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical center in percent of frame height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Text color as a CSS hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font size in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Background color as a CSS hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl ClipProperties {
    pub const DEFAULT_OPACITY: f32 = 1.0;
    pub const DEFAULT_SCALE: f32 = 1.0;
    pub const DEFAULT_X: f32 = 50.0;
    pub const DEFAULT_Y: f32 = 50.0;
    pub const DEFAULT_FONT_SIZE: f32 = 48.0;

    /// Properties given to media clips dropped from the library.
    pub fn media_defaults() -> Self {
        Self {
            opacity: Some(1.0),
            scale: Some(1.0),
            x: Some(Self::DEFAULT_X),
            y: Some(Self::DEFAULT_Y),
            ..Self::default()
        }
    }

    /// Properties given to freshly added text clips.
    pub fn text_defaults() -> Self {
        Self {
            opacity: Some(1.0),
            scale: Some(1.0),
            font_size: Some(Self::DEFAULT_FONT_SIZE),
            color: Some("#ffffff".to_string()),
            ..Self::default()
        }
    }

    /// Overwrite every field that is set in `patch`, after sanitizing it.
    /// Out-of-range values are clamped; unusable ones are dropped.
    pub fn merge(&mut self, patch: &ClipProperties) {
        if let Some(opacity) = patch.opacity.filter(|v| v.is_finite()) {
            self.opacity = Some(opacity.clamp(0.0, 1.0));
        }
        match patch.scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => self.scale = Some(scale),
            Some(scale) => warn!(scale, "ignoring non-positive clip scale"),
            None => {}
        }
        if let Some(x) = patch.x.filter(|v| v.is_finite()) {
            self.x = Some(x.clamp(0.0, 100.0));
        }
        if let Some(y) = patch.y.filter(|v| v.is_finite()) {
            self.y = Some(y.clamp(0.0, 100.0));
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        match patch.font_size {
            Some(size) if size.is_finite() && size > 0.0 => self.font_size = Some(size),
            Some(size) => warn!(size, "ignoring non-positive font size"),
            None => {}
        }
        if let Some(background) = &patch.background_color {
            self.background_color = Some(background.clone());
        }
    }

    /// Apply defaults to every absent field.
    pub fn resolve(&self) -> ResolvedProperties {
        ResolvedProperties {
            opacity: self.opacity.unwrap_or(Self::DEFAULT_OPACITY),
            scale: self.scale.unwrap_or(Self::DEFAULT_SCALE),
            x: self.x.unwrap_or(Self::DEFAULT_X),
            y: self.y.unwrap_or(Self::DEFAULT_Y),
            color: Color::from_hex_or(self.color.as_deref(), Color::WHITE),
            font_size: self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE),
            background_color: self
                .background_color
                .as_deref()
                .and_then(|hex| Color::from_hex(hex).ok()),
        }
    }
}

/// Clip properties with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProperties {
    pub opacity: f32,
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub font_size: f32,
    pub background_color: Option<Color>,
}

/// A clip on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Owning track
    pub track_id: TrackId,
    /// Mirrors the owning track's kind
    pub kind: TrackKind,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Position on the timeline in seconds
    pub start_time: f64,
    /// Duration on the timeline in seconds
    pub duration: f64,
    /// Start point within the source media in seconds
    pub offset: f64,
    /// Media URL, or the literal text of a text clip
    pub content: String,
    /// Visual attributes
    pub properties: ClipProperties,
}

impl Clip {
    /// Create a new clip with a fresh id and zero source offset.
    pub fn new(
        track_id: TrackId,
        kind: TrackKind,
        name: impl Into<String>,
        start_time: f64,
        duration: f64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            track_id,
            kind,
            name: name.into(),
            start_time: start_time.max(0.0),
            duration,
            offset: 0.0,
            content: content.into(),
            properties: ClipProperties::default(),
        }
    }

    /// Builder-style property assignment.
    pub fn with_properties(mut self, properties: ClipProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Timeline interval occupied by the clip.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Timeline end (exclusive).
    pub fn end_time(&self) -> f64 {
        self.range().end()
    }

    /// True when `time` falls inside `[start_time, start_time + duration)`.
    #[inline]
    pub fn is_active_at(&self, time: f64) -> bool {
        self.range().contains(time)
    }

    /// Position inside the source media that should be showing at the
    /// given timeline time.
    pub fn source_time_at(&self, time: f64) -> f64 {
        time - self.start_time + self.offset
    }
}

/// Partial update of a clip. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub offset: Option<f64>,
    pub content: Option<String>,
    pub properties: ClipProperties,
}

impl ClipPatch {
    /// Patch that only replaces the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch that only touches the property bag.
    pub fn properties(properties: ClipProperties) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Merge this patch into `clip`. Returns whether anything changed.
    pub fn apply_to(&self, clip: &mut Clip) -> bool {
        let before = clip.clone();

        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
        if let Some(start) = self.start_time.filter(|v| v.is_finite()) {
            clip.start_time = start.max(0.0);
        }
        match self.duration {
            Some(d) if d.is_finite() && d > 0.0 => clip.duration = d,
            Some(d) => warn!(clip = %clip.id, duration = d, "ignoring non-positive clip duration"),
            None => {}
        }
        if let Some(offset) = self.offset.filter(|v| v.is_finite()) {
            clip.offset = offset.max(0.0);
        }
        if let Some(content) = &self.content {
            clip.content = content.clone();
        }
        clip.properties.merge(&self.properties);

        *clip != before
    }
}
