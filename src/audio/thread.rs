use std::cell::Cell;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use super::sink::create_sink;
use super::types::{AudioCmd, EngineEvent, EngineUpdate, LoadId};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineUpdate>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // Every event is tagged with the most recent load.
        let current = Cell::new(LoadId::default());
        let emit = |ev: EngineEvent| {
            let _ = events.send(EngineUpdate::new(current.get(), ev));
        };

        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!("no audio output device: {e}");
                // Keep answering loads so the session learns why nothing plays.
                for cmd in rx {
                    match cmd {
                        AudioCmd::Load(source) => {
                            current.set(source.load);
                            emit(EngineEvent::Error(format!("no audio output device: {e}")));
                        }
                        AudioCmd::Quit => break,
                        _ => {}
                    }
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        // Set once `Ended` was reported for the current sink.
        let mut ended = false;

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(source) => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        ended = false;
                        current.set(source.load);

                        debug!(
                            mime = %source.mime_type,
                            bytes = source.bytes.len(),
                            "loading source"
                        );
                        match create_sink(&stream, source) {
                            Ok((new_sink, total)) => {
                                if let Some(total) = total {
                                    emit(EngineEvent::MetadataReady(total.as_secs_f64()));
                                }
                                new_sink.play();
                                sink = Some(new_sink);
                                emit(EngineEvent::TimeUpdated(0.0));
                                emit(EngineEvent::Started);
                            }
                            Err(e) => {
                                warn!("failed to decode source: {e}");
                                emit(EngineEvent::Error(e.to_string()));
                                emit(EngineEvent::Paused);
                            }
                        }
                    }

                    AudioCmd::Play => {
                        if let Some(ref s) = sink {
                            if s.is_paused() && !s.empty() {
                                s.play();
                                emit(EngineEvent::Started);
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !s.is_paused() {
                                s.pause();
                                emit(EngineEvent::Paused);
                            }
                        }
                    }

                    AudioCmd::Seek(to) => {
                        if let Some(ref s) = sink {
                            match s.try_seek(to) {
                                Ok(()) => emit(EngineEvent::TimeUpdated(s.get_pos().as_secs_f64())),
                                Err(e) => {
                                    warn!("seek to {to:?} failed: {e}");
                                    emit(EngineEvent::Error(e.to_string()));
                                }
                            }
                        }
                    }

                    AudioCmd::Detach => {
                        if let Some(s) = sink.take() {
                            let was_playing = !s.is_paused() && !ended;
                            s.stop();
                            if was_playing {
                                emit(EngineEvent::Paused);
                            }
                        }
                        ended = false;
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic position updates and end-of-track detection.
                    if let Some(ref s) = sink {
                        if s.is_paused() || ended {
                            continue;
                        }
                        if s.empty() {
                            ended = true;
                            emit(EngineEvent::Ended);
                        } else {
                            emit(EngineEvent::TimeUpdated(s.get_pos().as_secs_f64()));
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
