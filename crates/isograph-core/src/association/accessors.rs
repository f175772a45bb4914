//! Cross-store accessor pair
//!
//! Graph to relational is a primary-key lookup on the foreign-key property.
//! Relational to graph has no index in that direction and is a query on
//! the foreign-key predicate. Neither direction caches.

use crate::errors::{IsographError, Result};
use crate::model::{GraphInstance, ModelMut, ModelRef, Record, Value};
use crate::rdf::{Literal, TriplePattern};
use crate::registry::ModelRegistry;
use crate::store::{graph_mapper, GraphStore, RelationalStore};

/// `instance.<role>`: the linked record, or `None` when the key is null
///
/// # Errors
///
/// `NoMethod` if `role` is not an accessor of the instance's class;
/// `RecordNotFound` from the store for a dangling key.
pub fn related<R: RelationalStore + ?Sized>(
    registry: &ModelRegistry,
    relational: &R,
    instance: &GraphInstance,
    role: &str,
) -> Result<Option<Record>> {
    let (class, association) = registry.forward(instance.class(), role)?;
    let key = instance
        .get(class, &association.foreign_key)
        .and_then(|v| v.as_integer());
    match key {
        None => Ok(None),
        Some(id) => relational
            .find(registry.relational_of(association)?, id)
            .map(Some),
    }
}

/// `instance.<role> = value`
///
/// Only the in-memory foreign key changes; saving the instance is up to the
/// caller. `None`, or an unsaved record, clears the key.
///
/// # Errors
///
/// `TypeMismatch` unless `value` is a record of exactly the registered type.
pub fn relate(
    registry: &ModelRegistry,
    instance: &mut GraphInstance,
    role: &str,
    value: Option<ModelRef<'_>>,
) -> Result<()> {
    let (class, association) = registry.forward(instance.class(), role)?;
    let key = match value {
        None => Value::Null,
        Some(ModelRef::Record(record)) if record.model() == association.relational_class => {
            Value::from(record.id())
        }
        Some(other) => {
            return Err(IsographError::TypeMismatch {
                expected: association.relational_class.clone(),
                actual: other.type_name().to_string(),
            })
        }
    };
    instance.set(class, &association.foreign_key, key)
}

/// `record.<graph_role>`: the first graph instance whose foreign key holds
/// this record's id
///
/// # Errors
///
/// `NoMethod` if `graph_role` is not a reverse accessor of the record's model.
pub fn graph_for<G: GraphStore + ?Sized>(
    registry: &ModelRegistry,
    graph: &G,
    record: &Record,
    graph_role: &str,
) -> Result<Option<GraphInstance>> {
    let (association, graph_class) = registry.reverse(record.model(), graph_role)?;
    let Some(id) = record.id() else {
        return Ok(None);
    };
    let pattern = TriplePattern::any()
        .with_predicate(association.predicate.clone())
        .with_object(Literal::integer(id));
    match graph.query(&pattern)?.into_iter().next() {
        None => Ok(None),
        Some(statement) => graph_mapper::load(graph, graph_class, statement.subject).map(Some),
    }
}

/// `record.<graph_role> = value`
///
/// Severs the instance currently pointing at `record` (if it differs from
/// `value`), then points `value` at it. Every instance modified here is
/// saved, including `value` itself.
///
/// The sever and the link are separate graph writes with no transaction
/// around them. A failure between the two leaves the record unlinked, and
/// a concurrent writer that links another instance after the read below
/// is not severed, leaving two instances pointing at the same record.
///
/// # Errors
///
/// `TypeMismatch` unless `value` is an instance of exactly the registered
/// graph class; store errors propagate.
pub fn relate_graph<G: GraphStore + ?Sized>(
    registry: &ModelRegistry,
    graph: &G,
    record: &Record,
    graph_role: &str,
    value: Option<ModelMut<'_>>,
) -> Result<()> {
    let (association, graph_class) = registry.reverse(record.model(), graph_role)?;
    let mut value = match value {
        None => None,
        Some(ModelMut::Graph(instance)) if instance.class() == association.graph_class => {
            Some(instance)
        }
        Some(other) => {
            return Err(IsographError::TypeMismatch {
                expected: association.graph_class.clone(),
                actual: other.type_name().to_string(),
            })
        }
    };

    if let Some(mut current) = graph_for(registry, graph, record, graph_role)? {
        if value.as_deref() != Some(&current) {
            current.set(graph_class, &association.foreign_key, Value::Null)?;
            graph_mapper::save(graph, graph_class, &current)?;
            tracing::debug!(
                subject = current.subject().as_str(),
                foreign_key = %association.foreign_key,
                "severed previous link"
            );
        }
    }

    if let Some(instance) = value.as_deref_mut() {
        instance.set(graph_class, &association.foreign_key, Value::from(record.id()))?;
        graph_mapper::save(graph, graph_class, instance)?;
    }
    Ok(())
}
