use std::fmt;

/// Primary key of a stored track. Assigned by the store, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub i64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A track about to be imported: metadata plus the full payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    /// Original file name, including the extension.
    pub name: String,
    /// Declared content type; empty when unknown.
    pub mime_type: String,
    pub size_bytes: u64,
    /// Source file modification time in milliseconds since the Unix epoch.
    pub last_modified: i64,
    pub payload: Vec<u8>,
}

/// Metadata of a stored track, without its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMeta {
    pub id: TrackId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified: i64,
}
