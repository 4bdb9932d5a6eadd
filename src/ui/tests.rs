use ratatui::{Terminal, backend::TestBackend};

use super::*;
use crate::audio::{EngineEvent, EngineUpdate};
use crate::audio::fake::FakeEngine;
use crate::config::{ControlsSettings, ImportSettings, UiSettings};
use crate::session::PlaybackSession;
use crate::store::{NewTrack, TrackStore};

fn app() -> App<FakeEngine> {
    let (engine, _events) = FakeEngine::new();
    App::new(
        TrackStore::open_in_memory().unwrap(),
        PlaybackSession::new(engine),
        ImportSettings::default(),
    )
    .unwrap()
}

fn track(name: &str) -> NewTrack {
    NewTrack {
        name: name.to_string(),
        mime_type: String::new(),
        size_bytes: 2048,
        last_modified: 0,
        payload: vec![1, 2, 3],
    }
}

fn render(app: &App<FakeEngine>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal
        .draw(|f| draw(f, app, &UiSettings::default(), &ControlsSettings::default()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn controls_text_includes_seek_seconds() {
    let text = controls_text(7);
    assert!(text.starts_with("[j/k] up/down | [h/l] prev/next song | [H/L] seek -/+7s"));
    assert!(text.ends_with("[q] quit"));
}

#[test]
fn status_text_when_idle() {
    assert_eq!(status_text(&app(), &UiSettings::default()), "Stopped");
}

#[test]
fn status_text_shows_title_and_times() {
    let mut app = app();
    app.import_batch(vec![track("song.mp3")]);
    let load = app.session().current_load().unwrap();
    for event in [
        EngineEvent::Started,
        EngineEvent::MetadataReady(125.0),
        EngineEvent::TimeUpdated(61.5),
    ] {
        app.handle_engine_event(EngineUpdate::new(load, event));
    }

    assert_eq!(
        status_text(&app, &UiSettings::default()),
        "Playing • Song: song.mp3 [1:01 / 2:05] • CURSOR: Follow"
    );
}

#[test]
fn input_text_follows_mode() {
    let mut app = app();
    assert_eq!(input_text(&app), "");

    app.begin_import_prompt();
    app.push_input('~');
    assert_eq!(input_text(&app), "Import path: ~_");

    app.cancel_input();
    app.begin_clear_confirm();
    assert!(input_text(&app).starts_with("Delete every track?"));
}

#[test]
fn empty_library_draws_placeholder() {
    let screen = render(&app());
    assert!(screen.contains("No songs yet."));
    assert!(screen.contains("Stopped"));
}

#[test]
fn tracks_draw_with_detail() {
    let mut app = app();
    app.import_batch(vec![track("first.ogg"), track("second.ogg")]);

    let screen = render(&app);
    assert!(screen.contains("first.ogg"));
    assert!(screen.contains("second.ogg"));
    assert!(screen.contains("2.0 KB"));
    assert!(screen.contains("Imported 2 tracks"));
}
