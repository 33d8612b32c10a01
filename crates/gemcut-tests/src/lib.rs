//! Integration test crate for GemCut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the gemcut crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod playback;

#[cfg(test)]
mod storyboard;
