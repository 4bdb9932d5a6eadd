use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::record::{NewTrack, TrackId, TrackMeta};
use super::schema;

const SELECT_META: &str =
    "SELECT id, name, mime_type, size_bytes, last_modified FROM tracks";

/// Handle to the track database. One per process, opened at startup.
pub struct TrackStore {
    conn: Connection,
}

impl TrackStore {
    /// Open (or create) the database at `path`, creating parent directories
    /// as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::StorageUnavailable(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::StorageUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;

        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), tracks = store.count().unwrap_or(0), "track store opened");
        Ok(store)
    }

    /// Open a private in-memory database. Nothing survives the handle.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::StorageUnavailable(format!("cannot open in-memory store: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let unavailable = |e: rusqlite::Error| Error::StorageUnavailable(e.to_string());

        let version = schema::user_version(&conn).map_err(unavailable)?;
        if version > schema::SCHEMA_VERSION {
            return Err(Error::StorageUnavailable(format!(
                "database schema version {version} is newer than supported version {}",
                schema::SCHEMA_VERSION
            )));
        }
        if version < schema::SCHEMA_VERSION {
            schema::create_if_missing(&conn).map_err(unavailable)?;
        }

        Ok(Self { conn })
    }

    /// Persist `track` and return its newly assigned id.
    pub fn insert(&self, track: &NewTrack) -> Result<TrackId> {
        let size = i64::try_from(track.size_bytes)
            .map_err(|e| Error::WriteFailed(rusqlite::Error::ToSqlConversionFailure(Box::new(e))))?;

        self.conn
            .execute(
                "INSERT INTO tracks (name, mime_type, size_bytes, last_modified, payload)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    track.name,
                    track.mime_type,
                    size,
                    track.last_modified,
                    track.payload
                ],
            )
            .map_err(Error::WriteFailed)?;

        let id = TrackId(self.conn.last_insert_rowid());
        debug!(%id, name = %track.name, bytes = track.size_bytes, "track stored");
        Ok(id)
    }

    /// Metadata of every stored track, in ascending id order.
    pub fn list_metadata(&self) -> Result<Vec<TrackMeta>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_META} ORDER BY id ASC"))
            .map_err(Error::ReadFailed)?;
        let rows = stmt
            .query_map([], meta_from_row)
            .map_err(Error::ReadFailed)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::ReadFailed)
    }

    /// Metadata of every track stored under exactly `name`.
    #[cfg(test)]
    pub fn find_by_name(&self, name: &str) -> Result<Vec<TrackMeta>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_META} WHERE name = ?1 ORDER BY id ASC"))
            .map_err(Error::ReadFailed)?;
        let rows = stmt
            .query_map(params![name], meta_from_row)
            .map_err(Error::ReadFailed)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::ReadFailed)
    }

    /// The raw bytes of track `id`, or `None` if it no longer exists.
    pub fn get_payload(&self, id: TrackId) -> Result<Option<Vec<u8>>> {
        self.conn
            .query_row(
                "SELECT payload FROM tracks WHERE id = ?1",
                params![id.0],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(Error::ReadFailed)
    }

    /// Remove track `id`. Removing a missing track is not an error.
    pub fn delete(&self, id: TrackId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM tracks WHERE id = ?1", params![id.0])
            .map_err(Error::WriteFailed)?;
        debug!(%id, removed, "track delete");
        Ok(())
    }

    /// Remove every track in a single statement.
    pub fn clear(&self) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM tracks", [])
            .map_err(Error::WriteFailed)?;
        info!(removed, "track store cleared");
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))
            .map_err(Error::ReadFailed)?;
        Ok(n.max(0) as usize)
    }
}

fn meta_from_row(row: &Row<'_>) -> rusqlite::Result<TrackMeta> {
    let size: i64 = row.get(3)?;
    let size_bytes =
        u64::try_from(size).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(3, size))?;

    Ok(TrackMeta {
        id: TrackId(row.get(0)?),
        name: row.get(1)?,
        mime_type: row.get(2)?,
        size_bytes,
        last_modified: row.get(4)?,
    })
}
