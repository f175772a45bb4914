use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::{GraphStore, RelationalStore};
use crate::errors::{IsographError, Result};
use crate::model::{Attributes, Record, RelationalClass};
use crate::rdf::{Statement, TriplePattern};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Attributes>,
}

/// In-memory relational store
///
/// Rows are kept per table in id order. Interior mutability via `RefCell`:
/// single-threaded use only, like every call path in this crate.
#[derive(Debug, Default)]
pub struct MemoryRelationalStore {
    tables: RefCell<BTreeMap<String, Table>>,
}

impl MemoryRelationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored for `class`
    pub fn count(&self, class: &RelationalClass) -> usize {
        self.tables
            .borrow()
            .get(class.table())
            .map_or(0, |t| t.rows.len())
    }

    fn not_found(class: &RelationalClass, id: i64) -> IsographError {
        IsographError::RecordNotFound {
            model: class.name().to_string(),
            id,
        }
    }
}

impl RelationalStore for MemoryRelationalStore {
    fn find(&self, class: &RelationalClass, id: i64) -> Result<Record> {
        let tables = self.tables.borrow();
        let attributes = tables
            .get(class.table())
            .and_then(|t| t.rows.get(&id))
            .ok_or_else(|| Self::not_found(class, id))?;
        Ok(Record::new(class.name(), Some(id), attributes.clone()))
    }

    fn create(&self, class: &RelationalClass, attributes: Attributes) -> Result<Record> {
        let mut attributes = class.conform(attributes)?;
        class.stamp_created(&mut attributes);
        let mut tables = self.tables.borrow_mut();
        let table = tables.entry(class.table().to_string()).or_default();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, attributes.clone());
        tracing::debug!(model = class.name(), record_id = id, "created record");
        Ok(Record::new(class.name(), Some(id), attributes))
    }

    fn update(&self, class: &RelationalClass, record: &Record) -> Result<()> {
        let id = record.id().ok_or_else(|| IsographError::InvalidValue {
            attribute: class.primary_key().to_string(),
            expected: "saved record".to_string(),
            actual: "null".to_string(),
        })?;
        let mut attributes = class.conform(record.attributes().clone())?;
        class.stamp_updated(&mut attributes);
        let mut tables = self.tables.borrow_mut();
        let row = tables
            .get_mut(class.table())
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| Self::not_found(class, id))?;
        *row = attributes;
        Ok(())
    }

    fn delete(&self, class: &RelationalClass, id: i64) -> Result<()> {
        self.tables
            .borrow_mut()
            .get_mut(class.table())
            .and_then(|t| t.rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(class, id))
    }
}

/// In-memory statement set, ordered so query results are deterministic
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    statements: RefCell<BTreeSet<Statement>>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.borrow().is_empty()
    }
}

impl GraphStore for MemoryGraphStore {
    fn query(&self, pattern: &TriplePattern) -> Result<Vec<Statement>> {
        Ok(self
            .statements
            .borrow()
            .iter()
            .filter(|s| pattern.matches(s))
            .cloned()
            .collect())
    }

    fn insert(&self, statement: &Statement) -> Result<()> {
        self.statements.borrow_mut().insert(statement.clone());
        Ok(())
    }

    fn remove(&self, pattern: &TriplePattern) -> Result<usize> {
        let mut statements = self.statements.borrow_mut();
        let before = statements.len();
        statements.retain(|s| !pattern.matches(s));
        Ok(before - statements.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Value, ValueType, CREATED_AT, UPDATED_AT};
    use crate::rdf::{Iri, Literal};

    fn users() -> RelationalClass {
        RelationalClass::new("User", "users").column("email", ValueType::Text)
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = MemoryRelationalStore::new();
        let a = store.create(&users(), Attributes::new()).unwrap();
        let b = store.create(&users(), Attributes::new()).unwrap();
        assert_eq!(a.id(), Some(1));
        assert_eq!(b.id(), Some(2));
        assert_eq!(store.count(&users()), 2);
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let store = MemoryRelationalStore::new();
        assert_eq!(
            store.find(&users(), 42).unwrap_err(),
            IsographError::RecordNotFound {
                model: "User".into(),
                id: 42
            }
        );
    }

    #[test]
    fn test_update_and_delete() {
        let class = users();
        let store = MemoryRelationalStore::new();
        let mut record = store.create(&class, Attributes::new()).unwrap();
        record
            .set(&class, "email", Value::from("bob@example.com"))
            .unwrap();
        store.update(&class, &record).unwrap();
        assert_eq!(
            store.find(&class, 1).unwrap().get(&class, "email"),
            Some(Value::from("bob@example.com"))
        );

        store.delete(&class, 1).unwrap();
        assert!(store.find(&class, 1).is_err());
        assert!(store.delete(&class, 1).is_err());
    }

    #[test]
    fn test_timestamps_are_stamped_when_declared() {
        let class = users()
            .column(CREATED_AT, ValueType::Text)
            .column(UPDATED_AT, ValueType::Text);
        let store = MemoryRelationalStore::new();

        let mut attrs = Attributes::new();
        attrs.insert(CREATED_AT.to_string(), Value::from("2020-01-01T00:00:00+00:00"));
        let record = store.create(&class, attrs).unwrap();
        assert_eq!(
            record.get(&class, CREATED_AT),
            Some(Value::from("2020-01-01T00:00:00+00:00"))
        );
        let updated = record.get(&class, UPDATED_AT).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(updated.as_text().unwrap()).is_ok());

        let mut stale = record.clone();
        stale
            .set(&class, UPDATED_AT, Value::from("2020-01-01T00:00:00+00:00"))
            .unwrap();
        store.update(&class, &stale).unwrap();
        let stored = store.find(&class, 1).unwrap();
        assert_ne!(
            stored.get(&class, UPDATED_AT),
            Some(Value::from("2020-01-01T00:00:00+00:00"))
        );
        assert_eq!(
            stored.get(&class, CREATED_AT),
            Some(Value::from("2020-01-01T00:00:00+00:00"))
        );
    }

    #[test]
    fn test_classes_without_timestamps_are_left_alone() {
        let store = MemoryRelationalStore::new();
        let record = store.create(&users(), Attributes::new()).unwrap();
        assert!(record.attributes().is_empty());
    }

    #[test]
    fn test_graph_insert_is_idempotent_and_remove_counts() {
        let graph = MemoryGraphStore::new();
        let s = Iri::parse("http://example.org/s").unwrap();
        let p = Iri::parse("http://example.org/p").unwrap();
        let st = Statement::new(s.clone(), p.clone(), Literal::integer(1));
        graph.insert(&st).unwrap();
        graph.insert(&st).unwrap();
        assert_eq!(graph.len(), 1);

        let removed = graph
            .remove(&TriplePattern::any().with_subject(s))
            .unwrap();
        assert_eq!(removed, 1);
        assert!(graph.is_empty());
    }
}
