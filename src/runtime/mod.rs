use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::App;
use crate::audio::{AudioPlayer, EngineUpdate};
use crate::mpris::ControlCmd;
use crate::session::PlaybackSession;
use crate::store::TrackStore;

mod event_loop;
mod logging;
mod settings;

/// How often the audio thread reports the playback position.
const ENGINE_TICK: Duration = Duration::from_millis(200);

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    let _log_guard = match logging::init(&settings.log) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("cassette: logging disabled: {e}");
            None
        }
    };
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let db_path = settings.storage.resolved_db_path();
    let store = TrackStore::open(&db_path).inspect_err(|e| error!("{e}"))?;

    let (engine_tx, engine_rx) = mpsc::channel::<EngineUpdate>();
    let player = AudioPlayer::spawn(engine_tx, ENGINE_TICK);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mut session = PlaybackSession::new(player)
        .with_labels(&settings.media.artist_label, &settings.media.album_label);
    if settings.media.enabled {
        session = session.with_media(Box::new(crate::mpris::spawn_mpris(control_tx)));
    }

    let mut app = App::new(store, session, settings.import.clone())?;

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if !paths.is_empty() {
        app.import_paths(&paths);
    }

    // Any failure from here on still restores the terminal and stops audio.
    let run_result = (|| -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &engine_rx,
            &control_rx,
            &mut state,
        )
    })();

    let restored = restore_terminal();
    app.session().engine().quit();
    info!("shutting down");

    run_result?;
    restored?;
    Ok(())
}

/// Leave raw mode and the alternate screen. Every step is attempted even if
/// an earlier one fails.
fn restore_terminal() -> std::io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(std::io::stdout(), LeaveAlternateScreen, Show);
    if let Err(e) = &screen {
        warn!("restoring the terminal failed: {e}");
    }
    raw.and(screen)
}
