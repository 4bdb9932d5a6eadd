//! Playback session: the single loaded track and the transport operations.
//!
//! The session owns the playback engine and remembers which playlist entry is
//! loaded. Whether audio is actually playing is only ever learned from engine
//! events; transport calls merely ask the engine to change state.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{EngineEvent, EngineSource, EngineUpdate, LoadId, PlaybackEngine};
use crate::error::{Error, Result};
use crate::media::{MediaSurface, NowPlaying, PlaybackState};
use crate::playlist::PlaylistCache;
use crate::store::{TrackId, TrackStore};

pub const DEFAULT_ARTIST_LABEL: &str = "Local file";
pub const DEFAULT_ALBUM_LABEL: &str = "Offline Library";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Index to load when stepping in `direction` from `current` through a
/// playlist of `len` entries. Wraps at both ends; starts at 0 when nothing is
/// loaded; `None` for an empty playlist.
pub fn step_index(current: Option<usize>, direction: Direction, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(cur) = current else {
        return Some(0);
    };
    Some(match direction {
        Direction::Forward => (cur % len + 1) % len,
        Direction::Backward => (cur % len + len - 1) % len,
    })
}

pub struct PlaybackSession<E: PlaybackEngine> {
    engine: E,
    media: Option<Box<dyn MediaSurface>>,
    artist_label: String,
    album_label: String,

    current_index: Option<usize>,
    current_id: Option<TrackId>,
    /// Tag of the source last handed to the engine; events with any other
    /// tag belong to a replaced source.
    current_load: Option<LoadId>,
    loads: u64,
    is_playing: bool,
    position: f64,
    duration: f64,
}

impl<E: PlaybackEngine> PlaybackSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            media: None,
            artist_label: DEFAULT_ARTIST_LABEL.to_string(),
            album_label: DEFAULT_ALBUM_LABEL.to_string(),
            current_index: None,
            current_id: None,
            current_load: None,
            loads: 0,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
        }
    }

    /// Fixed artist/album text shown by the media surface for every track.
    pub fn with_labels(mut self, artist: impl Into<String>, album: impl Into<String>) -> Self {
        self.artist_label = artist.into();
        self.album_label = album.into();
        self
    }

    pub fn with_media(mut self, media: Box<dyn MediaSurface>) -> Self {
        media.set_now_playing(None);
        media.set_playback(PlaybackState::Idle);
        self.media = Some(media);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.current_id
    }

    #[cfg(test)]
    pub fn current_load(&self) -> Option<LoadId> {
        self.current_load
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn state(&self) -> PlaybackState {
        match (self.current_index, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Load playlist entry `index` into the engine and start it.
    ///
    /// On any error the session is left exactly as it was.
    pub fn load_and_play(
        &mut self,
        store: &TrackStore,
        cache: &PlaylistCache,
        index: usize,
    ) -> Result<()> {
        let meta = cache.at(index)?;
        let Some(payload) = store.get_payload(meta.id)? else {
            warn!(id = %meta.id, name = %meta.name, "payload missing, playback abandoned");
            return Err(Error::TrackUnavailable(meta.id));
        };

        self.loads += 1;
        let load = LoadId(self.loads);
        self.engine.load(EngineSource {
            load,
            mime_type: meta.mime_type.clone(),
            bytes: payload,
        });
        self.current_load = Some(load);
        self.current_index = Some(index);
        self.current_id = Some(meta.id);
        self.position = 0.0;
        self.duration = 0.0;
        info!(index, id = %meta.id, name = %meta.name, "now playing");

        if let Some(media) = &self.media {
            media.set_now_playing(Some(&NowPlaying {
                track: meta.id,
                title: meta.name.clone(),
                artist: self.artist_label.clone(),
                album: self.album_label.clone(),
            }));
            media.set_playback(self.state());
        }
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        if self.is_playing {
            self.engine.pause();
        } else {
            self.engine.play();
        }
    }

    pub fn play(&mut self) {
        if self.current_index.is_some() {
            self.engine.play();
        }
    }

    pub fn pause(&mut self) {
        if self.current_index.is_some() {
            self.engine.pause();
        }
    }

    /// Load the neighbouring entry, wrapping at both ends. No-op for an empty
    /// playlist.
    pub fn advance(
        &mut self,
        direction: Direction,
        store: &TrackStore,
        cache: &PlaylistCache,
    ) -> Result<()> {
        match step_index(self.current_index, direction, cache.len()) {
            Some(next) => self.load_and_play(store, cache, next),
            None => Ok(()),
        }
    }

    pub fn on_track_ended(&mut self, store: &TrackStore, cache: &PlaylistCache) -> Result<()> {
        self.advance(Direction::Forward, store, cache)
    }

    /// Seek the loaded track. Range checking is left to the engine.
    pub fn seek_to(&mut self, seconds: f64) {
        if self.current_index.is_none() {
            return;
        }
        let target = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX);
        self.engine.seek(target);
    }

    pub fn seek_by(&mut self, delta_seconds: f64) {
        self.seek_to(self.position + delta_seconds);
    }

    /// Drop the loaded track and return to `Idle`.
    pub fn clear_all(&mut self) {
        self.engine.detach();
        self.current_index = None;
        self.current_id = None;
        self.current_load = None;
        self.is_playing = false;
        self.position = 0.0;
        self.duration = 0.0;

        if let Some(media) = &self.media {
            media.set_now_playing(None);
            media.set_playback(PlaybackState::Idle);
        }
    }

    /// Re-resolve the loaded track after `cache` was rebuilt. If the track is
    /// gone the session returns to `Idle`.
    pub fn reconcile(&mut self, cache: &PlaylistCache) {
        let Some(id) = self.current_id else {
            return;
        };
        match cache.position_of(id) {
            Some(index) => self.current_index = Some(index),
            None => {
                info!(%id, "loaded track removed, stopping playback");
                self.clear_all();
            }
        }
    }

    /// Apply one engine update. Updates that arrive while idle, or that belong
    /// to a source other than the loaded one, change nothing.
    pub fn handle_engine_event(
        &mut self,
        update: EngineUpdate,
        store: &TrackStore,
        cache: &PlaylistCache,
    ) {
        let EngineUpdate { load, event } = update;
        if self.current_index.is_none() || self.current_load != Some(load) {
            if let EngineEvent::Error(msg) = &event {
                warn!("playback engine error: {msg}");
            } else {
                debug!(?load, ?event, "stale engine event ignored");
            }
            return;
        }

        match event {
            EngineEvent::Started => self.set_playing(true),
            EngineEvent::Paused => self.set_playing(false),
            EngineEvent::MetadataReady(duration) => self.duration = duration,
            EngineEvent::TimeUpdated(position) => self.position = position,
            EngineEvent::Ended => {
                self.set_playing(false);
                if let Err(e) = self.on_track_ended(store, cache) {
                    warn!("auto-advance failed: {e}");
                }
            }
            EngineEvent::Error(msg) => warn!("playback engine error: {msg}"),
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        if let Some(media) = &self.media {
            media.set_playback(self.state());
        }
    }
}
