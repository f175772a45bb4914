#![allow(clippy::unwrap_used, clippy::expect_used)]

use isograph_core::IsographError;
use isograph_store::{db, migrations};
use rusqlite::Connection;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    let tables = table_names(&conn);
    for expected in ["schema_version", "statements", "sqlite_sequence"] {
        assert!(
            tables.contains(&expected.to_string()),
            "missing table {expected}"
        );
    }
}

#[test]
fn test_migration_idempotency() {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    let applied = migrations::applied_migrations(&conn).unwrap();
    let ids: Vec<&str> = applied.iter().map(|m| m.migration_id.as_str()).collect();
    let expected: Vec<&str> = migrations::get_migrations().iter().map(|m| m.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_tampered_checksum_is_detected() {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_graph_statements'",
        [],
    )
    .unwrap();

    let err = migrations::apply_migrations(&mut conn).unwrap_err();
    match err {
        IsographError::ChecksumMismatch {
            migration_id,
            expected,
            ..
        } => {
            assert_eq!(migration_id, "001_graph_statements");
            assert_eq!(expected, "deadbeef");
        }
        other => panic!("expected checksum mismatch, got {other:?}"),
    }
}

#[test]
fn test_open_creates_parent_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(".isograph").join("store.db");
    let mut conn = db::open(&path).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    assert!(path.exists());
}
