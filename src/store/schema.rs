use rusqlite::Connection;

/// Version written to `PRAGMA user_version` when the schema is created.
pub(super) const SCHEMA_VERSION: i64 = 1;

const CREATE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tracks (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT    NOT NULL,
        mime_type     TEXT    NOT NULL DEFAULT '',
        size_bytes    INTEGER NOT NULL CHECK (size_bytes >= 0),
        last_modified INTEGER NOT NULL,
        payload       BLOB    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS tracks_name_idx ON tracks(name);
";

pub(super) fn user_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Create the schema on a fresh database. Existing databases at the current
/// version are left untouched.
pub(super) fn create_if_missing(conn: &Connection) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(CREATE_SCHEMA)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()
}
