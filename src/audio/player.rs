use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineSource, EngineUpdate, PlaybackEngine};

/// `rodio`-backed engine. Commands are forwarded to the audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread. Engine events are delivered on `events`.
    pub fn spawn(events: Sender<EngineUpdate>, tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let handle = spawn_audio_thread(rx, events, tick);

        Self {
            tx,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and wait for the audio thread to exit. Also runs on
    /// drop; later calls do nothing.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn forward(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            debug!("audio thread gone, dropping {:?}", e.0);
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit();
    }
}

impl PlaybackEngine for AudioPlayer {
    fn load(&mut self, source: EngineSource) {
        self.forward(AudioCmd::Load(source));
    }

    fn play(&mut self) {
        self.forward(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.forward(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.forward(AudioCmd::Seek(position));
    }

    fn detach(&mut self) {
        self.forward(AudioCmd::Detach);
    }
}
