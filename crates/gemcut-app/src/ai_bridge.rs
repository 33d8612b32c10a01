//! Bridge between the generative services and the editor session.
//!
//! Network calls run as tokio tasks; their results come back to the task
//! that owns the session and are applied there.

use std::sync::Arc;

use gemcut_ai::{
    AiConfig, AiResult, GeminiClient, GenerativeBackend, RewriteStyle, StoryboardGenerator,
    TextRefiner,
};
use gemcut_timeline::{
    ClipPatch, EditorSession, GenerationTicket, ImportOutcome, StoryboardSegment, TrackKind,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Storyboard and caption services sharing one backend.
pub struct AiServices<B> {
    storyboard: Arc<StoryboardGenerator<Arc<B>>>,
    refiner: TextRefiner<Arc<B>>,
}

impl AiServices<GeminiClient> {
    /// Services backed by the Gemini REST API.
    pub fn gemini(config: AiConfig) -> AiResult<Self> {
        Ok(Self::new(GeminiClient::new(config)?))
    }
}

impl<B: GenerativeBackend + 'static> AiServices<B> {
    pub fn new(backend: B) -> Self {
        let backend = Arc::new(backend);
        Self {
            storyboard: Arc::new(StoryboardGenerator::new(Arc::clone(&backend))),
            refiner: TextRefiner::new(backend),
        }
    }

    /// Start generating a storyboard for `topic` in the background.
    ///
    /// The session keeps running while the request is in flight; the
    /// returned handle carries the ticket used to detect stale results.
    pub fn request_storyboard(&self, session: &EditorSession, topic: String) -> PendingStoryboard {
        let ticket = session.begin_generation();
        let generator = Arc::clone(&self.storyboard);
        info!(topic = %topic, revision = ticket.revision(), "requesting storyboard");
        let task = tokio::spawn(async move { generator.generate(&topic).await });
        PendingStoryboard { ticket, task }
    }

    /// Rewrite the selected text clip in `style`.
    ///
    /// Returns the new caption, or `None` when nothing suitable is selected.
    /// A failed rewrite leaves the caption as it was.
    pub async fn rewrite_selected(
        &self,
        session: &mut EditorSession,
        style: &RewriteStyle,
    ) -> Option<String> {
        let clip = session.selected_clip()?;
        if clip.kind != TrackKind::Text {
            warn!(clip = %clip.name, "caption rewrite needs a text clip");
            return None;
        }
        let (id, original) = (clip.id, clip.content.clone());

        let rewritten = self.refiner.refine_or_original(&original, style).await;
        session.update_clip(id, ClipPatch::content(rewritten.clone()));
        Some(rewritten)
    }
}

/// A storyboard request in flight.
pub struct PendingStoryboard {
    ticket: GenerationTicket,
    task: JoinHandle<AiResult<Vec<StoryboardSegment>>>,
}

impl PendingStoryboard {
    /// Wait for the request and apply its result to `session`.
    pub async fn apply(self, session: &mut EditorSession) -> ImportOutcome {
        let outcome = match self.task.await {
            Ok(result) => session.finish_generation(self.ticket, result),
            Err(join_err) => session
                .finish_generation(self.ticket, Err::<Vec<StoryboardSegment>, _>(join_err)),
        };
        info!(?outcome, "storyboard request finished");
        outcome
    }
}
