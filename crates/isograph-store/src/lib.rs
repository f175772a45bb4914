//! Isograph Store - SQLite collaborators for the isomorphism core
//!
//! Provides:
//! - Connection helpers
//! - Embedded, checksummed migrations for the triple store schema
//! - `SqliteRelationalStore`: rows in arbitrary tables, keyed by integer id
//! - `SqliteGraphStore`: statements in a single `statements` table

pub mod db;
pub mod errors;
pub mod graph;
pub mod migrations;
pub mod relational;

pub use graph::SqliteGraphStore;
pub use relational::SqliteRelationalStore;
