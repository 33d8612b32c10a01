//! Integration tests for editing and timeline queries.
//!
//! Exercises gemcut-core geometry and color together with the
//! gemcut-timeline session, index and compositor.

use gemcut_core::{Color, Rect, Vec2};
use gemcut_timeline::{
    active_clips, demo_library, pixel_to_time, time_to_pixel, ClipPatch, ClipProperties,
    EditorSession, TimelineHit, TimelineLayout, TrackKind,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn session_with_demo() -> EditorSession {
    let mut session = EditorSession::default();
    let library = demo_library();
    session.add_media_clip(&library[0], 0.0);
    session.add_media_clip(&library[2], 5.0);
    session.add_text_clip("Hello", 2.0);
    session
}

// ── Adding clips ───────────────────────────────────────────────

#[test]
fn text_clip_is_live_for_three_seconds() {
    let mut session = EditorSession::default();
    let id = session.add_text_clip("Hello", 2.0).unwrap();

    let clips = session.clips();
    assert_eq!(active_clips(clips, 2.5).len(), 1);
    assert_eq!(active_clips(clips, 2.5)[0].id, id);
    assert!(active_clips(clips, 6.0).is_empty());
    assert!(active_clips(clips, 5.0).is_empty());
}

#[test]
fn media_clip_lands_on_track_for_asset_kind() {
    let session = session_with_demo();
    let project = session.project();

    let video_track = project.track_for(TrackKind::Video).unwrap().id;
    let text_track = project.track_for(TrackKind::Text).unwrap().id;

    let kinds: Vec<(TrackKind, bool)> = session
        .clips()
        .iter()
        .map(|c| (c.kind, c.track_id == video_track || c.track_id == text_track))
        .collect();
    assert_eq!(
        kinds,
        [
            (TrackKind::Video, true),
            (TrackKind::Video, true),
            (TrackKind::Text, true),
        ]
    );

    // Video assets run five seconds, images three.
    assert_eq!(session.clips()[0].duration, 5.0);
    assert_eq!(session.clips()[1].duration, 3.0);
}

#[test]
fn text_clip_name_is_truncated() {
    let mut session = EditorSession::default();
    let id = session.add_text_clip("A much longer caption", 0.0).unwrap();
    let clip = session.project().clip(id).unwrap();
    assert_eq!(clip.name, "A much lon");
    assert_eq!(clip.content, "A much longer caption");
}

// ── Updating and deleting ──────────────────────────────────────

#[test]
fn repeated_patch_is_idempotent() {
    let mut session = session_with_demo();
    let id = session.clips()[2].id;
    let patch = ClipPatch {
        start_time: Some(4.0),
        properties: ClipProperties {
            color: Some("#ff0000".into()),
            ..ClipProperties::default()
        },
        ..ClipPatch::default()
    };

    assert!(session.update_clip(id, patch.clone()));
    let once = session.project().clip(id).cloned().unwrap();
    assert!(!session.update_clip(id, patch));
    let twice = session.project().clip(id).cloned().unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.start_time, 4.0);
    // Untouched nested fields survive the merge.
    assert_eq!(twice.properties.font_size, Some(48.0));
    assert_eq!(
        twice.properties.resolve().color,
        Color::from_hex("#ff0000").unwrap()
    );
}

#[test]
fn delete_then_update_is_noop_and_clears_selection() {
    let mut session = session_with_demo();
    let id = session.clips()[0].id;
    session.select_clip(Some(id));
    assert_eq!(session.selected_id(), Some(id));

    assert!(session.delete_clip(id));
    assert!(session.selected_clip().is_none());
    assert_eq!(session.clips().len(), 2);

    let revision = session.project().revision();
    assert!(!session.update_clip(id, ClipPatch::content("ghost")));
    assert!(!session.delete_clip(id));
    assert_eq!(session.project().revision(), revision);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut session = session_with_demo();
    let before = session.project().snapshot();
    let stranger = Uuid::new_v4();

    assert!(!session.update_clip(stranger, ClipPatch::content("x")));
    assert!(!session.delete_clip(stranger));
    session.select_clip(Some(stranger));

    assert!(session.selected_clip().is_none());
    assert_eq!(*session.project().snapshot(), *before);
}

#[test]
fn snapshots_are_not_affected_by_later_edits() {
    let mut session = session_with_demo();
    let before = session.project().snapshot();
    let id = session.clips()[2].id;

    session.update_clip(id, ClipPatch::content("Changed"));

    assert_eq!(before[2].content, "Hello");
    assert_eq!(session.clips()[2].content, "Changed");
}

// ── Layout and preview ─────────────────────────────────────────

#[test]
fn pixel_time_mapping_round_trips() {
    for zoom in [10.0, 40.0, 73.5] {
        for px in [0.0, 1.0, 250.0, 1234.5] {
            let back = time_to_pixel(pixel_to_time(px, zoom), zoom);
            assert!((back - px).abs() < 1e-9, "zoom {zoom} px {px}");
        }
    }
}

#[test]
fn hit_test_finds_clip_under_pointer() {
    let session = session_with_demo();
    let layout = TimelineLayout::default();
    let project = session.project();
    let zoom = session.zoom();

    // The Hello text clip is on lane 0 and starts at 2 s.
    let text = &session.clips()[2];
    let rect = layout.clip_rect(text, 0, zoom);
    let origin = Vec2::new(layout.header_width, layout.ruler_height);
    let hit = layout.hit_test(project.tracks(), project.clips(), origin + rect.center(), zoom);
    assert_eq!(hit, TimelineHit::Clip { id: text.id });

    let ruler = Vec2::new(layout.header_width + 80.0, 4.0);
    match layout.hit_test(project.tracks(), project.clips(), ruler, zoom) {
        TimelineHit::Ruler { time } => assert!((time - 2.0).abs() < 1e-6),
        other => panic!("expected ruler hit, got {other:?}"),
    }
}

#[test]
fn preview_shows_video_and_caption() {
    let mut session = session_with_demo();
    session.seek(2.5);

    let frame = session.compose();
    let primary = frame.primary.expect("video under playhead");
    assert_eq!(primary.clip.content, demo_library()[0].url);
    assert_eq!(frame.overlays.len(), 1);

    let surface = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    assert_eq!(frame.overlays[0].anchor(surface), Vec2::new(960.0, 540.0));
    assert_eq!(frame.overlays[0].fill(), Color::WHITE);

    session.seek(9.0);
    assert!(session.compose().is_no_signal());
}
