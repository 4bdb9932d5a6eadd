//! Application module: the controller that owns the library and playback.
//!
//! `App` lives in `app::model` and holds the track store, the playlist cache,
//! the playback session and the cursor/input state the TUI draws from.

mod model;

pub use model::*;
