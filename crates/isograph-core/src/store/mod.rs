//! Collaborator contracts for the two stores
//!
//! The isomorphism core never owns persistence. It reaches the relational
//! store through primary-key operations and the graph store through
//! statement patterns; everything else (SQL dialect, triple indexing,
//! connection handling) belongs to the implementations.

pub mod graph_mapper;
pub mod memory;

use crate::errors::Result;
use crate::model::{Attributes, Record, RelationalClass};
use crate::rdf::{Statement, TriplePattern};

pub use memory::{MemoryGraphStore, MemoryRelationalStore};

/// Relational side: rows keyed by an integer primary key
pub trait RelationalStore {
    /// Primary-key lookup
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no row has `id`; `Persistence` on store failure.
    fn find(&self, class: &RelationalClass, id: i64) -> Result<Record>;

    /// Insert a row and return it with its assigned id
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` / `InvalidValue` for attributes outside the schema,
    /// `Persistence` on store failure.
    fn create(&self, class: &RelationalClass, attributes: Attributes) -> Result<Record>;

    /// Write every column of a saved record
    ///
    /// # Errors
    ///
    /// `RecordNotFound` if the row is gone, `InvalidValue` for unsaved records.
    fn update(&self, class: &RelationalClass, record: &Record) -> Result<()>;

    /// # Errors
    ///
    /// `RecordNotFound` if no row has `id`.
    fn delete(&self, class: &RelationalClass, id: i64) -> Result<()>;
}

/// Graph side: a set of statements
pub trait GraphStore {
    /// All statements matching `pattern`, ordered by subject then predicate
    ///
    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn query(&self, pattern: &TriplePattern) -> Result<Vec<Statement>>;

    /// Add a statement; inserting an existing statement is a no-op
    ///
    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn insert(&self, statement: &Statement) -> Result<()>;

    /// Remove every statement matching `pattern`, returning how many went
    ///
    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn remove(&self, pattern: &TriplePattern) -> Result<usize>;
}

impl<T: RelationalStore + ?Sized> RelationalStore for &T {
    fn find(&self, class: &RelationalClass, id: i64) -> Result<Record> {
        (**self).find(class, id)
    }

    fn create(&self, class: &RelationalClass, attributes: Attributes) -> Result<Record> {
        (**self).create(class, attributes)
    }

    fn update(&self, class: &RelationalClass, record: &Record) -> Result<()> {
        (**self).update(class, record)
    }

    fn delete(&self, class: &RelationalClass, id: i64) -> Result<()> {
        (**self).delete(class, id)
    }
}

impl<T: GraphStore + ?Sized> GraphStore for &T {
    fn query(&self, pattern: &TriplePattern) -> Result<Vec<Statement>> {
        (**self).query(pattern)
    }

    fn insert(&self, statement: &Statement) -> Result<()> {
        (**self).insert(statement)
    }

    fn remove(&self, pattern: &TriplePattern) -> Result<usize> {
        (**self).remove(pattern)
    }
}
