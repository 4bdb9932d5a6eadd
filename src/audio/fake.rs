//! A recording engine for tests. It answers commands with the events a real
//! engine would send, without touching an audio device.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::types::{EngineEvent, EngineSource, EngineUpdate, LoadId, PlaybackEngine};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCall {
    Load { mime_type: String, bytes: Vec<u8> },
    Play,
    Pause,
    Seek(Duration),
    Detach,
}

pub(crate) struct FakeEngine {
    pub calls: Vec<EngineCall>,
    /// Reported by `MetadataReady` after every load.
    pub duration: f64,
    /// When set, loads fail the way an undecodable file does.
    pub reject_loads: bool,
    events: Sender<EngineUpdate>,
    current: LoadId,
    loaded: bool,
    playing: bool,
}

impl FakeEngine {
    pub fn new() -> (Self, Receiver<EngineUpdate>) {
        let (tx, rx) = mpsc::channel();
        let engine = Self {
            calls: Vec::new(),
            duration: 180.0,
            reject_loads: false,
            events: tx,
            current: LoadId::default(),
            loaded: false,
            playing: false,
        };
        (engine, rx)
    }

    pub fn last_load(&self) -> Option<&[u8]> {
        self.calls.iter().rev().find_map(|c| match c {
            EngineCall::Load { bytes, .. } => Some(bytes.as_slice()),
            _ => None,
        })
    }

    fn emit(&self, ev: EngineEvent) {
        let _ = self.events.send(EngineUpdate::new(self.current, ev));
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, source: EngineSource) {
        self.current = source.load;
        self.calls.push(EngineCall::Load {
            mime_type: source.mime_type,
            bytes: source.bytes,
        });
        if self.reject_loads {
            self.loaded = false;
            self.playing = false;
            self.emit(EngineEvent::Error("unsupported format".into()));
            self.emit(EngineEvent::Paused);
            return;
        }
        self.loaded = true;
        self.playing = true;
        self.emit(EngineEvent::MetadataReady(self.duration));
        self.emit(EngineEvent::TimeUpdated(0.0));
        self.emit(EngineEvent::Started);
    }

    fn play(&mut self) {
        self.calls.push(EngineCall::Play);
        if self.loaded && !self.playing {
            self.playing = true;
            self.emit(EngineEvent::Started);
        }
    }

    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
        if self.playing {
            self.playing = false;
            self.emit(EngineEvent::Paused);
        }
    }

    fn seek(&mut self, position: Duration) {
        self.calls.push(EngineCall::Seek(position));
        if self.loaded {
            self.emit(EngineEvent::TimeUpdated(position.as_secs_f64()));
        }
    }

    fn detach(&mut self) {
        self.calls.push(EngineCall::Detach);
        if self.playing {
            self.emit(EngineEvent::Paused);
        }
        self.loaded = false;
        self.playing = false;
    }
}
