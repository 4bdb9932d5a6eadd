//! OS media surface: the platform's now-playing display and transport keys.

use crate::store::TrackId;

/// Coarse playback state shown by the media surface and the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing loaded.
    #[default]
    Idle,
    Paused,
    Playing,
}

/// What the media surface shows for the loaded track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub track: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Sink for now-playing updates. Transport requests travel the other way as
/// `mpris::ControlCmd` messages.
pub trait MediaSurface {
    /// `None` clears the display.
    fn set_now_playing(&self, now_playing: Option<&NowPlaying>);
    fn set_playback(&self, state: PlaybackState);
}
