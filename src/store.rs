//! Durable track storage.
//!
//! Tracks live in a single SQLite table that holds both the metadata and the
//! raw audio bytes. The payload is only read back on demand, when a track is
//! about to be handed to the playback engine.

mod record;
mod schema;
mod track_store;

pub use record::*;
pub use track_store::TrackStore;
