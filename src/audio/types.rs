//! Engine commands, events and the trait the playback session drives.

use std::time::Duration;

/// Tags one `load`. Events carry the tag of the source they came from, so
/// events from a replaced source can be told apart from current ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

/// An in-memory audio source handed to the engine.
pub struct EngineSource {
    pub load: LoadId,
    /// Declared content type; may be empty.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for EngineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSource")
            .field("load", &self.load)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source with a new one and start playing it.
    Load(EngineSource),
    /// Resume the current source.
    Play,
    /// Pause the current source.
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Stop and drop the current source.
    Detach,
    /// Stop playback and exit the audio thread.
    Quit,
}

/// State changes reported by the engine. Positions and durations are seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Started,
    Paused,
    MetadataReady(f64),
    TimeUpdated(f64),
    Ended,
    /// Decoding or output failure. Never fatal.
    Error(String),
}

/// An engine event and the load it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineUpdate {
    pub load: LoadId,
    pub event: EngineEvent,
}

impl EngineUpdate {
    pub fn new(load: LoadId, event: EngineEvent) -> Self {
        Self { load, event }
    }
}

/// The single audio output the playback session controls.
pub trait PlaybackEngine {
    fn load(&mut self, source: EngineSource);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn detach(&mut self);
}
