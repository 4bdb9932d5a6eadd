//! Application model types: `App` and `InputMode`.
//!
//! Every library mutation goes through `App` so that the playlist cache is
//! rebuilt and the session re-resolved right after the store changes.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::audio::{EngineUpdate, PlaybackEngine};
use crate::config::ImportSettings;
use crate::error::Result;
use crate::import::{self, ImportReport};
use crate::media::PlaybackState;
use crate::playlist::PlaylistCache;
use crate::presenter::{self, RowAction};
use crate::session::{Direction, PlaybackSession};
use crate::store::{NewTrack, TrackId, TrackStore};

/// What keystrokes currently feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a file or directory path to import.
    ImportPrompt,
    /// Waiting for `y` before clearing the library.
    ConfirmClear,
}

/// The main application model.
pub struct App<E: PlaybackEngine> {
    store: TrackStore,
    cache: PlaylistCache,
    session: PlaybackSession<E>,
    import_settings: ImportSettings,

    pub selected: usize,
    /// Cursor jumps to the loaded track whenever playback moves.
    pub follow_playback: bool,
    pub input: InputMode,
    pub input_buffer: String,
    /// One-line message for the last notable outcome.
    pub status: Option<String>,
}

impl<E: PlaybackEngine> App<E> {
    /// Build the app around an opened store and fill the playlist from it.
    pub fn new(
        store: TrackStore,
        session: PlaybackSession<E>,
        import_settings: ImportSettings,
    ) -> Result<Self> {
        let mut cache = PlaylistCache::new();
        cache.refresh(&store)?;
        info!(tracks = cache.len(), "library loaded");

        Ok(Self {
            store,
            cache,
            session,
            import_settings,
            selected: 0,
            follow_playback: true,
            input: InputMode::Normal,
            input_buffer: String::new(),
            status: None,
        })
    }

    #[cfg(test)]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn cache(&self) -> &PlaylistCache {
        &self.cache
    }

    pub fn session(&self) -> &PlaybackSession<E> {
        &self.session
    }

    /// Name of the loaded track, if any.
    pub fn now_playing_title(&self) -> Option<&str> {
        let index = self.session.current_index()?;
        self.cache.at(index).ok().map(|m| m.name.as_str())
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.session.state()
    }

    // ---- library -------------------------------------------------------

    /// Import files and directories from disk. Each file is read and stored
    /// before the next one is touched.
    pub fn import_paths(&mut self, paths: &[PathBuf]) -> ImportReport {
        let files = import::collect_paths(paths, &self.import_settings);
        info!(roots = paths.len(), files = files.len(), "importing");

        let mut report = ImportReport::default();
        for path in &files {
            match import::read_import_file(path) {
                Ok(track) => self.insert_one(&track, &mut report),
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    report.failed += 1;
                }
            }
        }
        self.finish_import(report)
    }

    /// Store already-read tracks as one batch.
    pub fn import_batch(&mut self, tracks: Vec<NewTrack>) -> ImportReport {
        let mut report = ImportReport::default();
        for track in &tracks {
            self.insert_one(track, &mut report);
        }
        self.finish_import(report)
    }

    fn insert_one(&mut self, track: &NewTrack, report: &mut ImportReport) {
        match self.store.insert(track) {
            Ok(_) => report.imported += 1,
            Err(e) => {
                warn!(name = %track.name, "import failed: {e}");
                report.failed += 1;
            }
        }
    }

    fn finish_import(&mut self, report: ImportReport) -> ImportReport {
        info!(
            imported = report.imported,
            failed = report.failed,
            "import finished"
        );
        self.status = Some(import_status(&report));

        if let Err(e) = self.cache.refresh(&self.store) {
            self.fail("refreshing the playlist failed", e);
            return report;
        }
        self.session.reconcile(&self.cache);

        // First import into an idle player starts playback.
        if self.session.current_index().is_none() && !self.cache.is_empty() {
            if let Err(e) = self.play_at(0) {
                self.fail("could not start playback", e);
            }
        }
        report
    }

    /// Remove one track. If it was loaded, playback stops, even when the
    /// playlist cannot be rebuilt afterwards.
    pub fn delete_track(&mut self, id: TrackId) -> Result<()> {
        self.store.delete(id)?;
        info!(%id, "track deleted");

        if let Err(e) = self.cache.refresh(&self.store) {
            if self.session.current_id() == Some(id) {
                self.session.clear_all();
            }
            return Err(e);
        }
        self.session.reconcile(&self.cache);
        self.clamp_selection();
        Ok(())
    }

    /// Remove every track and return to idle.
    pub fn clear_library(&mut self) -> Result<()> {
        self.store.clear()?;
        self.session.clear_all();
        self.selected = 0;
        self.cache.refresh(&self.store)?;
        info!("library cleared");
        Ok(())
    }

    // ---- row actions ---------------------------------------------------

    pub fn perform(&mut self, action: RowAction) -> Result<()> {
        match action {
            RowAction::Play(index) => self.play_at(index),
            RowAction::Delete(id) => self.delete_track(id),
        }
    }

    pub fn play_at(&mut self, index: usize) -> Result<()> {
        self.session.load_and_play(&self.store, &self.cache, index)?;
        self.selected = index;
        self.follow_playback = true;
        Ok(())
    }

    /// Play the row under the cursor. Nothing happens on an empty list.
    pub fn play_selected(&mut self) -> Result<()> {
        match presenter::row_at(&self.cache, self.selected) {
            Some(row) => self.perform(row.play_action()),
            None => Ok(()),
        }
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        match presenter::row_at(&self.cache, self.selected) {
            Some(row) => self.perform(row.delete_action()),
            None => Ok(()),
        }
    }

    // ---- transport -----------------------------------------------------

    /// Pause or resume; when idle, start the row under the cursor.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.session.state() == PlaybackState::Idle {
            return self.play_selected();
        }
        self.follow_playback = true;
        self.session.toggle_play_pause();
        Ok(())
    }

    /// Resume; when idle, start the row under the cursor.
    pub fn play(&mut self) -> Result<()> {
        if self.session.state() == PlaybackState::Idle {
            return self.play_selected();
        }
        self.session.play();
        Ok(())
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn next_track(&mut self) -> Result<()> {
        self.step(Direction::Forward)
    }

    pub fn prev_track(&mut self) -> Result<()> {
        self.step(Direction::Backward)
    }

    fn step(&mut self, direction: Direction) -> Result<()> {
        self.follow_playback = true;
        self.session.advance(direction, &self.store, &self.cache)?;
        self.follow_cursor();
        Ok(())
    }

    pub fn seek_by(&mut self, delta_seconds: f64) {
        self.session.seek_by(delta_seconds);
    }

    pub fn handle_engine_event(&mut self, update: EngineUpdate) {
        self.session
            .handle_engine_event(update, &self.store, &self.cache);
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        if !self.follow_playback {
            return;
        }
        if let Some(index) = self.session.current_index() {
            self.selected = index;
        }
    }

    // ---- cursor --------------------------------------------------------

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.cache.len();
        if len == 0 {
            return;
        }
        self.follow_playback = false;
        self.selected = (self.selected + 1) % len;
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let len = self.cache.len();
        if len == 0 {
            return;
        }
        self.follow_playback = false;
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn select_first(&mut self) {
        self.follow_playback = false;
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.follow_playback = false;
        self.selected = self.cache.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.cache.len() {
            self.selected = self.cache.len().saturating_sub(1);
        }
    }

    // ---- input line ----------------------------------------------------

    pub fn begin_import_prompt(&mut self) {
        self.input = InputMode::ImportPrompt;
        self.input_buffer.clear();
    }

    pub fn begin_clear_confirm(&mut self) {
        self.input = InputMode::ConfirmClear;
    }

    pub fn push_input(&mut self, c: char) {
        if self.input == InputMode::ImportPrompt {
            self.input_buffer.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        self.input_buffer.pop();
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Import the path typed at the prompt. An empty line just closes it.
    pub fn submit_import(&mut self) -> Option<ImportReport> {
        let raw = std::mem::take(&mut self.input_buffer);
        self.input = InputMode::Normal;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(self.import_paths(&[expand_home(trimmed)]))
    }

    /// Answer the clear confirmation. Only `yes` clears.
    pub fn confirm_clear(&mut self, yes: bool) {
        self.input = InputMode::Normal;
        if !yes {
            self.status = Some("Clear cancelled".to_string());
            return;
        }
        match self.clear_library() {
            Ok(()) => self.status = Some("Library cleared".to_string()),
            Err(e) => self.fail("clearing the library failed", e),
        }
    }

    /// Log a recoverable failure and show it on the status line.
    pub fn fail(&mut self, what: &str, err: crate::error::Error) {
        warn!("{what}: {err}");
        self.status = Some(format!("{what}: {err}"));
    }
}

fn import_status(report: &ImportReport) -> String {
    let noun = if report.imported == 1 { "track" } else { "tracks" };
    match (report.imported, report.failed) {
        (0, 0) => "No audio files found".to_string(),
        (n, 0) => format!("Imported {n} {noun}"),
        (n, f) => format!("Imported {n} {noun}, {f} failed"),
    }
}

/// `~/music` → `$HOME/music`.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}
