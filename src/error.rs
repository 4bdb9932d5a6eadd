//! Error types shared by the library, playlist and playback layers.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::TrackId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The track database could not be opened or created. Fatal at startup.
    #[error("track storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A write was rejected by the database; nothing was changed.
    #[error("failed to write to track storage: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    /// A read from the database failed.
    #[error("failed to read from track storage: {0}")]
    ReadFailed(#[source] rusqlite::Error),

    #[error("index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// The track was listed but its payload is gone from storage.
    #[error("track {0} is no longer available")]
    TrackUnavailable(TrackId),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
