//! Migrate command
//!
//! Usage: isograph migrate [--schema <FILE>] [--db <FILE>]

use super::Globals;
use isograph_store::{migrations, SqliteRelationalStore};

/// Apply embedded migrations, then create a table per relational class
///
/// A missing schema file only skips the table step.
pub fn execute(globals: &Globals) -> anyhow::Result<()> {
    let mut conn = globals.connection()?;
    migrations::apply_migrations(&mut conn)?;
    let applied = migrations::applied_migrations(&conn)?;
    println!("✓ {} migration(s) applied", applied.len());

    if !globals.schema.exists() {
        tracing::debug!(schema = %globals.schema.display(), "no schema file, skipping tables");
        return Ok(());
    }

    let registry = globals.registry()?;
    let store = SqliteRelationalStore::new(&conn);
    for class in registry.relational_classes() {
        store.create_table(class)?;
        println!("✓ Table {} ready for {}", class.table(), class.name());
    }
    Ok(())
}
