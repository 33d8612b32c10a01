//! Integration tests for generation feeding the timeline.
//!
//! A scripted backend stands in for the network so gemcut-ai and
//! gemcut-timeline can be exercised end to end.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use gemcut_ai::{
    AiError, AiResult, GenerateRequest, GenerativeBackend, RewriteStyle, StoryboardGenerator,
    TextRefiner,
};
use gemcut_timeline::{
    ClipPatch, EditorSession, ImportOutcome, TrackKind, PLACEHOLDER_VIDEO_URL,
};
use parking_lot::Mutex;

// ── Helpers ────────────────────────────────────────────────────

/// Backend that answers from a queue and records every request.
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<AiResult<String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    fn with(replies: impl IntoIterator<Item = AiResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl GenerativeBackend for ScriptedBackend {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = AiResult<String>> + Send {
        self.requests.lock().push(request.clone());
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or(Err(AiError::EmptyResponse));
        async move { reply }
    }
}

const THREE_FOUR: &str = r#"[
    {"description": "Skyline at dusk", "duration": 3, "suggestedText": "Tokyo"},
    {"description": "Crowded crossing", "duration": 4, "suggestedText": "Shibuya"}
]"#;

fn seeded_session() -> EditorSession {
    let mut session = EditorSession::default();
    session.add_text_clip("Old caption", 0.0);
    session.add_text_clip("Another", 10.0);
    session.seek(7.0);
    session
}

// ── Storyboard import ──────────────────────────────────────────

#[tokio::test]
async fn storyboard_replaces_timeline() {
    let generator = StoryboardGenerator::new(ScriptedBackend::with([Ok(THREE_FOUR.into())]));
    let mut session = seeded_session();
    let first = session.clips()[0].id;
    session.select_clip(Some(first));

    let ticket = session.begin_generation();
    let result = generator.generate("A day in Tokyo").await;
    let outcome = session.finish_generation(ticket, result);

    assert_eq!(outcome, ImportOutcome::Applied { scenes: 2 });
    assert_eq!(session.current_time(), 0.0);
    assert!(session.selected_clip().is_none());

    let layout: Vec<(TrackKind, f64, f64, &str)> = session
        .clips()
        .iter()
        .map(|c| (c.kind, c.start_time, c.duration, c.content.as_str()))
        .collect();
    assert_eq!(
        layout,
        [
            (TrackKind::Video, 0.0, 3.0, PLACEHOLDER_VIDEO_URL),
            (TrackKind::Text, 0.0, 3.0, "Tokyo"),
            (TrackKind::Video, 3.0, 4.0, PLACEHOLDER_VIDEO_URL),
            (TrackKind::Text, 3.0, 4.0, "Shibuya"),
        ]
    );
}

#[tokio::test]
async fn empty_generation_clears_timeline() {
    let generator = StoryboardGenerator::new(ScriptedBackend::with([Ok("[]".into())]));
    let mut session = seeded_session();

    let ticket = session.begin_generation();
    let outcome = session.finish_generation(ticket, generator.generate("topic").await);

    assert_eq!(outcome, ImportOutcome::Empty);
    assert!(session.clips().is_empty());
}

#[tokio::test]
async fn failed_generation_degrades_without_error() {
    let generator = StoryboardGenerator::new(ScriptedBackend::with([Err(AiError::MissingApiKey)]));
    let mut session = seeded_session();

    let ticket = session.begin_generation();
    let outcome = session.finish_generation(ticket, generator.generate("topic").await);

    assert_eq!(outcome, ImportOutcome::Degraded);
    assert!(session.clips().is_empty());
    assert_eq!(session.current_time(), 0.0);
}

#[tokio::test]
async fn degrade_helper_yields_empty_list() {
    let generator = StoryboardGenerator::new(ScriptedBackend::with([Ok("{\"oops\": 1}".into())]));
    assert!(generator.generate_or_empty("topic").await.is_empty());
}

#[tokio::test]
async fn late_result_after_edit_is_dropped() {
    let generator = StoryboardGenerator::new(ScriptedBackend::with([Ok(THREE_FOUR.into())]));
    let mut session = seeded_session();

    let ticket = session.begin_generation();
    let id = session.clips()[0].id;
    session.update_clip(id, ClipPatch::content("Edited meanwhile"));
    let outcome = session.finish_generation(ticket, generator.generate("topic").await);

    assert_eq!(outcome, ImportOutcome::Stale);
    assert_eq!(session.clips().len(), 2);
    assert_eq!(session.clips()[0].content, "Edited meanwhile");
}

#[tokio::test]
async fn blank_prompt_never_reaches_backend() {
    let backend = Arc::new(ScriptedBackend::default());
    let generator = StoryboardGenerator::new(Arc::clone(&backend));
    assert!(generator.generate_or_empty("  ").await.is_empty());
    assert_eq!(backend.request_count(), 0);
}

// ── Caption rewrite ────────────────────────────────────────────

#[tokio::test]
async fn caption_rewrite_updates_clip() {
    let backend = ScriptedBackend::with([Ok("Tokyo, but make it fun!\n".into())]);
    let refiner = TextRefiner::new(backend);
    let mut session = seeded_session();
    let id = session.clips()[0].id;

    let text = refiner
        .refine_or_original(&session.clips()[0].content, &RewriteStyle::Funny)
        .await;
    assert!(session.update_clip(id, ClipPatch::content(text)));

    assert_eq!(session.clips()[0].content, "Tokyo, but make it fun!");
}

#[tokio::test]
async fn caption_rewrite_falls_back_to_original() {
    let refiner = TextRefiner::new(ScriptedBackend::with([Err(AiError::Status {
        status: 503,
        body: "overloaded".into(),
    })]));

    let text = refiner
        .refine_or_original("Old caption", &"dramatic".parse().unwrap())
        .await;
    assert_eq!(text, "Old caption");
}

#[tokio::test]
async fn backend_sees_one_request_per_call() {
    let backend = Arc::new(ScriptedBackend::with([
        Ok(THREE_FOUR.into()),
        Ok("Fancy".into()),
    ]));
    let generator = StoryboardGenerator::new(backend.clone());
    let refiner = TextRefiner::new(backend.clone());

    generator.generate("topic").await.unwrap();
    refiner.refine("plain", &RewriteStyle::Professional).await.unwrap();

    assert_eq!(backend.request_count(), 2);
    let requests = backend.requests.lock();
    assert!(requests[0].response_schema.is_some());
    assert!(requests[1].response_schema.is_none());
}
