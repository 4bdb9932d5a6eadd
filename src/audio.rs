//! Playback engine.
//!
//! The engine owns the audio output device on a dedicated thread and plays at
//! most one in-memory source at a time. Callers drive it through the
//! [`PlaybackEngine`] trait and observe it through the [`EngineEvent`]s it
//! sends on the channel supplied at construction.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
