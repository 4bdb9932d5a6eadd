//! MPRIS media surface over the D-Bus session bus.
//!
//! Desktop media keys and widgets call into the `Player` interface, which
//! forwards them as [`ControlCmd`]s to the runtime. Now-playing updates from
//! the session are stored in shared state and announced with
//! `PropertiesChanged` signals.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::{debug, info, warn};
use zbus::object_server::InterfaceRef;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::media::{MediaSurface, NowPlaying, PlaybackState};

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.cassette";
const NOTIFY_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    now_playing: Option<NowPlaying>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MediaSurface for MprisHandle {
    fn set_now_playing(&self, now_playing: Option<&NowPlaying>) {
        if let Ok(mut s) = self.state.lock() {
            s.now_playing = now_playing.cloned();
        }
        let _ = self.notify.send(());
    }

    fn set_playback(&self, state: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = state;
        }
        let _ = self.notify.send(());
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "cassette"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        status_str(s.playback)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let now_playing = self.state.lock().ok().and_then(|s| s.now_playing.clone());
        metadata_map(now_playing.as_ref())
    }
}

fn status_str(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Idle => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

fn metadata_map(now_playing: Option<&NowPlaying>) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();
    let Some(np) = now_playing else {
        // An empty map is the MPRIS way of saying "no track".
        return map;
    };

    let owned = |v: Value<'_>| OwnedValue::try_from(v).ok();

    let track_path = format!("{OBJECT_PATH}/track/{}", np.track.0);
    if let Some(v) = ObjectPath::try_from(track_path)
        .ok()
        .and_then(|p| owned(Value::from(p)))
    {
        map.insert("mpris:trackid".to_string(), v);
    }
    if let Some(v) = owned(Value::from(np.title.clone())) {
        map.insert("xesam:title".to_string(), v);
    }
    if let Some(v) = owned(Value::from(vec![np.artist.clone()])) {
        map.insert("xesam:artist".to_string(), v);
    }
    if let Some(v) = owned(Value::from(np.album.clone())) {
        map.insert("xesam:album".to_string(), v);
    }
    map
}

/// Register the MPRIS service on a background thread. If the session bus is
/// unreachable the handle still works; updates simply go nowhere.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            if let Err(e) = serve(tx, state_for_thread, notify_rx).await {
                warn!("MPRIS unavailable: {e}");
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

async fn serve(
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
    notify: Receiver<()>,
) -> zbus::Result<()> {
    let connection = Connection::session().await?;
    connection.request_name(BUS_NAME).await?;

    let object_server = connection.object_server();
    object_server
        .at(OBJECT_PATH, RootIface { tx: tx.clone() })
        .await?;
    object_server
        .at(OBJECT_PATH, PlayerIface { tx, state })
        .await?;
    info!(name = BUS_NAME, "MPRIS service registered");

    let player: InterfaceRef<PlayerIface> = object_server.interface(OBJECT_PATH).await?;

    loop {
        Timer::after(NOTIFY_INTERVAL).await;

        let mut changed = false;
        loop {
            match notify.try_recv() {
                Ok(()) => changed = true,
                Err(mpsc::TryRecvError::Empty) => break,
                // The player is gone; keep serving until the process exits.
                Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        if !changed {
            continue;
        }

        let iface = player.get().await;
        let emitter = player.signal_emitter();
        if let Err(e) = iface.playback_status_changed(emitter).await {
            debug!("MPRIS PlaybackStatus signal failed: {e}");
        }
        if let Err(e) = iface.metadata_changed(emitter).await {
            debug!("MPRIS Metadata signal failed: {e}");
        }
    }
}
