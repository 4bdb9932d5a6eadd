use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::audio::fake::{EngineCall, FakeEngine};
use crate::config::{ImportSettings, Settings};
use crate::media::PlaybackState;
use crate::session::PlaybackSession;
use crate::store::{NewTrack, TrackStore};

fn app_with(names: &[&str]) -> (App<FakeEngine>, Receiver<EngineUpdate>) {
    let store = TrackStore::open_in_memory().unwrap();
    for name in names {
        store
            .insert(&NewTrack {
                name: name.to_string(),
                mime_type: String::new(),
                size_bytes: 1,
                last_modified: 0,
                payload: vec![0],
            })
            .unwrap();
    }
    let (engine, events) = FakeEngine::new();
    let app = App::new(store, PlaybackSession::new(engine), ImportSettings::default()).unwrap();
    (app, events)
}

fn pump(app: &mut App<FakeEngine>, events: &Receiver<EngineUpdate>) {
    while let Ok(ev) = events.try_recv() {
        app.handle_engine_event(ev);
    }
}

fn press(app: &mut App<FakeEngine>, state: &mut EventLoopState, code: KeyCode) -> bool {
    handle_key_event(
        KeyEvent::new(code, KeyModifiers::NONE),
        &Settings::default(),
        app,
        state,
    )
}

#[test]
fn q_quits() {
    let (mut app, _events) = app_with(&[]);
    let mut state = EventLoopState::default();
    assert!(press(&mut app, &mut state, KeyCode::Char('q')));
}

#[test]
fn gg_needs_two_presses() {
    let (mut app, _events) = app_with(&["a", "b", "c"]);
    let mut state = EventLoopState::default();

    press(&mut app, &mut state, KeyCode::Char('G'));
    assert_eq!(app.selected, 2);

    press(&mut app, &mut state, KeyCode::Char('g'));
    assert_eq!(app.selected, 2);
    assert!(state.pending_gg);

    press(&mut app, &mut state, KeyCode::Char('j'));
    assert!(!state.pending_gg);
    assert_eq!(app.selected, 0);

    press(&mut app, &mut state, KeyCode::Char('j'));
    press(&mut app, &mut state, KeyCode::Char('g'));
    press(&mut app, &mut state, KeyCode::Char('g'));
    assert_eq!(app.selected, 0);
}

#[test]
fn enter_plays_row_under_cursor() {
    let (mut app, events) = app_with(&["a", "b"]);
    let mut state = EventLoopState::default();

    press(&mut app, &mut state, KeyCode::Char('j'));
    press(&mut app, &mut state, KeyCode::Enter);
    pump(&mut app, &events);

    assert_eq!(app.now_playing_title(), Some("b"));
    assert_eq!(app.playback_state(), PlaybackState::Playing);
}

#[test]
fn seek_keys_use_configured_step() {
    let (mut app, events) = app_with(&["a"]);
    let mut state = EventLoopState::default();
    press(&mut app, &mut state, KeyCode::Enter);
    pump(&mut app, &events);

    press(&mut app, &mut state, KeyCode::Char('L'));
    assert_eq!(
        app.session().engine().calls.last(),
        Some(&EngineCall::Seek(Duration::from_secs(5)))
    );
}

#[test]
fn d_deletes_selected_row() {
    let (mut app, _events) = app_with(&["a", "b"]);
    let mut state = EventLoopState::default();

    press(&mut app, &mut state, KeyCode::Char('d'));
    assert_eq!(app.cache().len(), 1);
    assert_eq!(app.cache().at(0).unwrap().name, "b");
}

#[test]
fn import_prompt_captures_keys_until_escape() {
    let (mut app, _events) = app_with(&[]);
    let mut state = EventLoopState::default();

    press(&mut app, &mut state, KeyCode::Char('a'));
    assert_eq!(app.input, InputMode::ImportPrompt);

    // `q` is text here, not quit
    assert!(!press(&mut app, &mut state, KeyCode::Char('q')));
    press(&mut app, &mut state, KeyCode::Char('x'));
    press(&mut app, &mut state, KeyCode::Backspace);
    assert_eq!(app.input_buffer, "q");

    press(&mut app, &mut state, KeyCode::Esc);
    assert_eq!(app.input, InputMode::Normal);
    assert!(app.input_buffer.is_empty());
}

#[test]
fn clear_requires_y() {
    let (mut app, _events) = app_with(&["a", "b"]);
    let mut state = EventLoopState::default();

    press(&mut app, &mut state, KeyCode::Char('C'));
    press(&mut app, &mut state, KeyCode::Char('n'));
    assert_eq!(app.cache().len(), 2);

    press(&mut app, &mut state, KeyCode::Char('C'));
    press(&mut app, &mut state, KeyCode::Char('y'));
    assert!(app.cache().is_empty());
    assert_eq!(app.input, InputMode::Normal);
}

#[test]
fn control_commands_drive_transport() {
    let (mut app, events) = app_with(&["a", "b", "c"]);

    assert!(!handle_control_cmd(ControlCmd::Play, &mut app));
    pump(&mut app, &events);
    assert_eq!(app.session().current_index(), Some(0));
    assert_eq!(app.playback_state(), PlaybackState::Playing);

    handle_control_cmd(ControlCmd::Next, &mut app);
    pump(&mut app, &events);
    assert_eq!(app.session().current_index(), Some(1));

    handle_control_cmd(ControlCmd::Prev, &mut app);
    handle_control_cmd(ControlCmd::Prev, &mut app);
    pump(&mut app, &events);
    assert_eq!(app.session().current_index(), Some(2));

    handle_control_cmd(ControlCmd::Stop, &mut app);
    pump(&mut app, &events);
    assert_eq!(app.playback_state(), PlaybackState::Paused);

    handle_control_cmd(ControlCmd::PlayPause, &mut app);
    pump(&mut app, &events);
    assert_eq!(app.playback_state(), PlaybackState::Playing);

    assert!(handle_control_cmd(ControlCmd::Quit, &mut app));
}

#[test]
fn transport_on_empty_library_is_quiet() {
    let (mut app, _events) = app_with(&[]);
    let mut state = EventLoopState::default();

    for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('l'), KeyCode::Char('h')] {
        press(&mut app, &mut state, code);
    }
    assert_eq!(app.playback_state(), PlaybackState::Idle);
    assert_eq!(app.status, None);
    assert!(app.session().engine().calls.is_empty());
}
