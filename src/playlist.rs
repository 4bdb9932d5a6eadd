//! In-memory playlist: the ordered metadata of every stored track.
//!
//! The playlist is never patched in place. After any change to the store it is
//! rebuilt wholesale with [`PlaylistCache::refresh`].

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{TrackId, TrackMeta, TrackStore};

#[derive(Debug, Default)]
pub struct PlaylistCache {
    entries: Vec<TrackMeta>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the store's current listing. On failure the
    /// previous contents are kept.
    pub fn refresh(&mut self, store: &TrackStore) -> Result<()> {
        self.entries = store.list_metadata()?;
        debug!(len = self.entries.len(), "playlist refreshed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&TrackMeta> {
        self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn entries(&self) -> &[TrackMeta] {
        &self.entries
    }

    /// Current position of track `id`, if it is still listed.
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.entries.iter().position(|m| m.id == id)
    }
}
