//! Caption rewriting.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::client::{GenerateRequest, GenerativeBackend};
use crate::error::{AiError, AiResult};

/// Tone to rewrite a caption in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteStyle {
    Funny,
    Professional,
    /// Any other instruction, passed through verbatim.
    Custom(String),
}

impl RewriteStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Funny => "funny",
            Self::Professional => "professional",
            Self::Custom(style) => style,
        }
    }
}

impl fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewriteStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "funny" => Self::Funny,
            "professional" => Self::Professional,
            _ => Self::Custom(s.trim().to_string()),
        })
    }
}

/// Prompt asking for a short plain-text rewrite.
pub fn refine_prompt(text: &str, style: &RewriteStyle) -> String {
    format!(
        "Rewrite the following short video caption to be \"{style}\": \"{text}\". \
         Keep it short (under 10 words). Return only the plain text."
    )
}

/// Rewrites captions through a generative backend.
#[derive(Debug, Clone)]
pub struct TextRefiner<B> {
    backend: B,
}

impl<B: GenerativeBackend> TextRefiner<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Rewrite `text` in `style`. The answer is trimmed; a blank answer is
    /// [`AiError::EmptyResponse`].
    pub async fn refine(&self, text: &str, style: &RewriteStyle) -> AiResult<String> {
        let request = GenerateRequest::text(refine_prompt(text, style));
        let answer = self.backend.generate(&request).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        info!(%style, "caption rewritten");
        Ok(answer.to_string())
    }

    /// Like [`refine`](Self::refine), but any failure returns `text` unchanged.
    pub async fn refine_or_original(&self, text: &str, style: &RewriteStyle) -> String {
        match self.refine(text, style).await {
            Ok(rewritten) => rewritten,
            Err(err) => {
                warn!(error = %err, %style, "caption rewrite failed, keeping original");
                text.to_string()
            }
        }
    }
}
