//! Connection management

use crate::errors::{from_rusqlite, io_error};
use isograph_core::Result;
use rusqlite::Connection;
use std::path::Path;

/// Open (creating if needed) the database at `path`, and its parent directory
///
/// # Errors
///
/// `Io` if the directory cannot be created, `Persistence` if SQLite fails.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// # Errors
///
/// `Persistence` if SQLite fails.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// # Errors
///
/// `Persistence` if a pragma is rejected.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;
    // journal_mode returns a row, so it cannot go through execute
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(from_rusqlite)?;
    Ok(())
}
