//! Service configuration, read from the environment.

use std::time::Duration;

use crate::error::{AiError, AiResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the generation service.
#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// API key; a missing key only fails at call time.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// Scheme and host of the REST API, without a trailing slash
    pub api_base: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl AiConfig {
    /// Read configuration from process environment variables:
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `API_KEY`, then `GEMINI_API_KEY` | none |
    /// | `GEMCUT_MODEL` | `gemini-2.5-flash` |
    /// | `GEMCUT_API_BASE` | `https://generativelanguage.googleapis.com` |
    /// | `GEMCUT_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = non_empty("GEMCUT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            api_key: non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
            model: non_empty("GEMCUT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty("GEMCUT_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout,
        }
    }

    /// The API key, or [`AiError::MissingApiKey`].
    pub fn api_key(&self) -> AiResult<&str> {
        self.api_key.as_deref().ok_or(AiError::MissingApiKey)
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
