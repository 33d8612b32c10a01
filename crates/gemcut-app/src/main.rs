//! GemCut - AI-assisted browser video editor, headless driver
//!
//! Builds an editor session, optionally asks the generation service for a
//! storyboard and a caption rewrite, then plays the timeline against a
//! simulated media element while logging what the preview would show.

mod ai_bridge;
mod headless;

use anyhow::{Context, Result};
use clap::Parser;
use gemcut_ai::{AiConfig, RewriteStyle};
use gemcut_core::format_clock;
use gemcut_timeline::{demo_library, EditorSession, Project, TrackKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::ai_bridge::AiServices;
use crate::headless::{run_playback, HeadlessMedia};

/// GemCut headless editor
#[derive(Parser, Debug)]
#[command(name = "gemcut")]
#[command(about = "Generate a storyboard and preview it without a browser")]
#[command(version)]
struct Args {
    /// Storyboard topic; without it a demo timeline is built from stock assets
    #[arg(short, long)]
    prompt: Option<String>,

    /// Rewrite the first caption in this style (funny, professional, or any text)
    #[arg(long)]
    rewrite: Option<String>,

    /// Seconds of wall time to play back
    #[arg(short, long, default_value = "5")]
    seconds: f64,

    /// Frame callbacks per second
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Timeline zoom in pixels per second
    #[arg(long, default_value = "40")]
    zoom: f64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("GemCut starting...");

    let mut session = EditorSession::new(Project::new("GemCut Project"));
    session.set_zoom(args.zoom);

    let config = AiConfig::from_env();
    if config.api_key.is_none() && (args.prompt.is_some() || args.rewrite.is_some()) {
        warn!("no API key configured; generation requests will degrade");
    }
    let services = AiServices::gemini(config).context("failed to build generation client")?;

    match &args.prompt {
        Some(topic) => {
            let outcome = services
                .request_storyboard(&session, topic.clone())
                .apply(&mut session)
                .await;
            if session.clips().is_empty() {
                warn!(?outcome, "timeline is empty");
            }
        }
        None => build_demo(&mut session),
    }

    if let Some(style) = &args.rewrite {
        let style: RewriteStyle = style.parse()?;
        let first_caption = session
            .clips()
            .iter()
            .find(|c| c.kind == TrackKind::Text)
            .map(|c| c.id);
        session.select_clip(first_caption);
        match services.rewrite_selected(&mut session, &style).await {
            Some(text) => info!(%style, caption = %text, "caption updated"),
            None => warn!("no caption to rewrite"),
        }
    }

    print_timeline(&session);

    let mut media = HeadlessMedia::new();
    let summary = run_playback(&mut session, &mut media, args.fps, args.seconds).await?;
    info!(
        loads = media.loads(),
        at = %format_clock(summary.final_time),
        "GemCut done"
    );

    Ok(())
}

/// Fill the timeline the way a user would from the media browser.
fn build_demo(session: &mut EditorSession) {
    let library = demo_library();
    let mut cursor = 0.0;
    for asset in &library {
        if session.add_media_clip(asset, cursor).is_some() {
            cursor += asset.kind.default_duration();
        }
    }
    session.add_text_clip("Welcome to GemCut", 0.0);
    info!(clips = session.clips().len(), "demo timeline ready");
}

fn print_timeline(session: &EditorSession) {
    let project = session.project();
    info!(project = project.name(), clips = project.clips().len(), "timeline");
    for track in project.tracks() {
        info!(track = %track.name, kind = track.kind.label(), "track");
        for clip in project.clips().iter().filter(|c| c.track_id == track.id) {
            info!(
                clip = %clip.name,
                start = %format_clock(clip.start_time),
                end = %format_clock(clip.end_time()),
                content = %clip.content,
                "  clip"
            );
        }
    }
    let ruler = session.ruler();
    if let (Some(first), Some(last)) = (ruler.first(), ruler.last()) {
        info!(
            markers = ruler.len(),
            from = %first.label,
            to = %last.label,
            zoom = session.zoom(),
            "ruler"
        );
    }
}
