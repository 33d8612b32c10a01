//! GemCut AI - Generative services
//!
//! Provides the network-facing features of the editor:
//! - Storyboard generation from a topic prompt
//! - Caption rewriting in a chosen style
//!
//! Both talk to a [`GenerativeBackend`]; [`GeminiClient`] is the production
//! implementation. Fallible calls return [`AiResult`]; the `*_or_*` helpers
//! log the failure and degrade instead.

pub mod client;
pub mod config;
pub mod error;
pub mod refine;
pub mod storyboard;

pub use client::{extract_text, GeminiClient, GenerateRequest, GenerativeBackend};
pub use config::AiConfig;
pub use error::{AiError, AiResult};
pub use refine::{refine_prompt, RewriteStyle, TextRefiner};
pub use storyboard::{parse_storyboard, storyboard_prompt, storyboard_schema, StoryboardGenerator};
