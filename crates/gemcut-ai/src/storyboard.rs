//! Storyboard generation.
//!
//! Asks the backend for a structured list of scenes and parses it into
//! [`StoryboardSegment`]s ready for [`gemcut_timeline::layout_storyboard`].

use gemcut_timeline::StoryboardSegment;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::{GenerateRequest, GenerativeBackend};
use crate::error::{AiError, AiResult};

/// Prompt asking for 3–5 scenes about `topic`.
pub fn storyboard_prompt(topic: &str) -> String {
    format!(
        "Create a video storyboard for the following topic: \"{topic}\".\n\
         Break it down into 3-5 engaging segments.\n\
         For each segment, provide a visual description, a suggested duration \
         (between 2 and 5 seconds), and a short text overlay string."
    )
}

/// JSON schema the service must answer with.
pub fn storyboard_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "description": { "type": "STRING" },
                "duration": { "type": "NUMBER" },
                "suggestedText": { "type": "STRING" }
            },
            "required": ["description", "duration", "suggestedText"]
        }
    })
}

/// Parse the service's answer. Tolerates a surrounding markdown code fence.
pub fn parse_storyboard(text: &str) -> AiResult<Vec<StoryboardSegment>> {
    let body = strip_code_fence(text.trim());
    Ok(serde_json::from_str(body)?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (`json`) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Turns a topic into storyboard segments.
#[derive(Debug, Clone)]
pub struct StoryboardGenerator<B> {
    backend: B,
}

impl<B: GenerativeBackend> StoryboardGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Generate segments for `topic`.
    ///
    /// A blank topic is rejected without calling the backend.
    pub async fn generate(&self, topic: &str) -> AiResult<Vec<StoryboardSegment>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AiError::EmptyPrompt);
        }

        let request = GenerateRequest::json(storyboard_prompt(topic), storyboard_schema());
        let text = self.backend.generate(&request).await?;
        let segments = parse_storyboard(&text)?;
        info!(topic, segments = segments.len(), "storyboard generated");
        Ok(segments)
    }

    /// Like [`generate`](Self::generate), but any failure yields an empty list.
    pub async fn generate_or_empty(&self, topic: &str) -> Vec<StoryboardSegment> {
        match self.generate(topic).await {
            Ok(segments) => segments,
            Err(err) => {
                warn!(error = %err, "storyboard generation failed");
                Vec::new()
            }
        }
    }
}
