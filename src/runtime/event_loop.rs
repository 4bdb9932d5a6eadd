use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{App, InputMode};
use crate::audio::{EngineUpdate, PlaybackEngine};
use crate::config;
use crate::error::Result as AppResult;
use crate::mpris::ControlCmd;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: drains engine events and media-surface
/// commands, draws, then handles one key press. Returns `Ok(())` when
/// shutdown is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
    engine_rx: &mpsc::Receiver<EngineUpdate>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = engine_rx.try_recv() {
            app.handle_engine_event(ev);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn report<E: PlaybackEngine>(app: &mut App<E>, what: &str, result: AppResult<()>) {
    if let Err(e) = result {
        app.fail(what, e);
    }
}

/// Apply a transport request from the media surface. Returns true on quit.
pub fn handle_control_cmd<E: PlaybackEngine>(cmd: ControlCmd, app: &mut App<E>) -> bool {
    match cmd {
        ControlCmd::Quit => {
            info!("quit requested over MPRIS");
            return true;
        }
        ControlCmd::Play => {
            let r = app.play();
            report(app, "could not start playback", r);
        }
        ControlCmd::Pause | ControlCmd::Stop => app.pause(),
        ControlCmd::PlayPause => {
            let r = app.toggle_play_pause();
            report(app, "could not start playback", r);
        }
        ControlCmd::Next => {
            let r = app.next_track();
            report(app, "could not play next track", r);
        }
        ControlCmd::Prev => {
            let r = app.prev_track();
            report(app, "could not play previous track", r);
        }
    }
    false
}

/// Apply one key press. Returns true on quit.
pub fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<E>,
    state: &mut EventLoopState,
) -> bool {
    match app.input {
        InputMode::ImportPrompt => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => app.pop_input(),
                KeyCode::Enter => {
                    app.submit_import();
                }
                KeyCode::Char(c) if !c.is_control() => app.push_input(c),
                _ => {}
            }
            return false;
        }
        InputMode::ConfirmClear => {
            state.pending_gg = false;
            app.confirm_clear(matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')));
            return false;
        }
        InputMode::Normal => {}
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let seek = settings.controls.seek_seconds as f64;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            let r = app.play_selected();
            report(app, "could not play track", r);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let r = app.toggle_play_pause();
            report(app, "could not start playback", r);
        }
        KeyCode::Char('l') => {
            let r = app.next_track();
            report(app, "could not play next track", r);
        }
        KeyCode::Char('h') => {
            let r = app.prev_track();
            report(app, "could not play previous track", r);
        }
        KeyCode::Char('L') => app.seek_by(seek),
        KeyCode::Char('H') => app.seek_by(-seek),
        KeyCode::Char('d') => {
            let r = app.delete_selected();
            report(app, "could not delete track", r);
        }
        KeyCode::Char('a') => app.begin_import_prompt(),
        KeyCode::Char('C') => app.begin_clear_confirm(),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests;
