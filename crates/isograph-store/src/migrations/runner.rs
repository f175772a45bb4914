use crate::errors::{checksum_mismatch, from_rusqlite, migration_error};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use isograph_core::Result;
use rusqlite::{Connection, OptionalExtension};

/// A row of `schema_version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub migration_id: String,
    pub applied_at: String,
    pub checksum: String,
}

/// Apply every pending embedded migration
///
/// # Errors
///
/// `ChecksumMismatch` if an applied migration's SQL has changed since,
/// `Migration` if a migration's SQL fails, `Persistence` otherwise.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;
    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }
    Ok(())
}

/// Applied migrations in application order
///
/// # Errors
///
/// `Persistence` if `schema_version` cannot be read.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    create_schema_version_table(conn)?;
    let mut stmt = conn
        .prepare("SELECT migration_id, applied_at, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedMigration {
                migration_id: row.get(0)?,
                applied_at: row.get(1)?,
                checksum: row.get(2)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration_id, &recorded, &checksum));
        }
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration_id, chrono::Utc::now().to_rfc3339(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id, "applied migration");
    Ok(())
}
