//! GemCut Core - Foundation types for the editor
//!
//! This crate provides the fundamental types shared by the other crates:
//! - Time ranges in seconds and playhead clock formatting
//! - Colors parsed from CSS hex strings
//! - Frame geometry for placing overlays
//! - The common error type

pub mod color;
pub mod error;
pub mod geometry;
pub mod time;

pub use color::Color;
pub use error::{GemCutError, Result};
pub use geometry::{Rect, Vec2};
pub use time::{format_clock, TimeRange};
