//! Attribute delegation bridge
//!
//! Forwarding tables are built once, at registration, from each side's
//! declared attribute list. A name already answered by the target class
//! (property, column, accessor or an earlier delegation) is never
//! forwarded.

use super::{accessors, AssociationId};
use crate::errors::{IsographError, Result};
use crate::model::{GraphClass, GraphInstance, Record, RelationalClass, Value};
use crate::registry::ModelRegistry;
use crate::store::{graph_mapper, GraphStore, RelationalStore};

/// Build both forwarding tables; returns how many names each side gained
pub(crate) fn install(
    graph: &mut GraphClass,
    relational: &mut RelationalClass,
    id: AssociationId,
) -> (usize, usize) {
    let to_graph: Vec<String> = relational
        .attribute_names()
        .into_iter()
        .filter(|name| !graph.responds_to(name))
        .collect();
    let to_relational: Vec<String> = graph
        .property_names()
        .into_iter()
        .filter(|name| !relational.responds_to(name))
        .collect();

    let counts = (to_graph.len(), to_relational.len());
    graph.delegations.extend(to_graph.into_iter().map(|n| (n, id)));
    relational
        .delegations
        .extend(to_relational.into_iter().map(|n| (n, id)));
    counts
}

/// Read `name` on a graph instance: own property first, then delegation
///
/// # Errors
///
/// `NoMethod` if the class neither declares nor delegates `name`;
/// `NoAssociationTarget` if the link is null; lookup errors propagate.
pub fn read_graph_attribute<R: RelationalStore + ?Sized>(
    registry: &ModelRegistry,
    relational: &R,
    instance: &GraphInstance,
    name: &str,
) -> Result<Value> {
    let class = registry.require_graph_class(instance.class())?;
    if let Some(value) = instance.get(class, name) {
        return Ok(value);
    }
    let id = class.delegation(name).ok_or_else(|| no_method(instance.class(), name))?;
    let association = registry.association_at(id)?;
    let record = accessors::related(registry, relational, instance, &association.role)?
        .ok_or_else(|| no_target(instance.class(), &association.role, name))?;
    record
        .get(registry.relational_of(association)?, name)
        .ok_or_else(|| no_method(record.model(), name))
}

/// Write `name` on a graph instance
///
/// Own properties are assigned in memory. Delegated names load the linked
/// record, assign and update it in the relational store.
///
/// # Errors
///
/// As [`read_graph_attribute`], plus value validation and store errors.
pub fn write_graph_attribute<R: RelationalStore + ?Sized>(
    registry: &ModelRegistry,
    relational: &R,
    instance: &mut GraphInstance,
    name: &str,
    value: Value,
) -> Result<()> {
    let class = registry.require_graph_class(instance.class())?;
    if class.property(name).is_some() {
        return instance.set(class, name, value);
    }
    let id = class.delegation(name).ok_or_else(|| no_method(instance.class(), name))?;
    let association = registry.association_at(id)?;
    let target = registry.relational_of(association)?;
    let mut record = accessors::related(registry, relational, instance, &association.role)?
        .ok_or_else(|| no_target(instance.class(), &association.role, name))?;
    record.set(target, name, value)?;
    relational.update(target, &record)
}

/// Read `name` on a record: native attribute first, then delegation
///
/// # Errors
///
/// `NoMethod` if the model neither declares nor delegates `name`;
/// `NoAssociationTarget` if no graph instance points at the record.
pub fn read_record_attribute<G: GraphStore + ?Sized>(
    registry: &ModelRegistry,
    graph: &G,
    record: &Record,
    name: &str,
) -> Result<Value> {
    let class = registry.require_relational(record.model())?;
    if let Some(value) = record.get(class, name) {
        return Ok(value);
    }
    let id = class.delegation(name).ok_or_else(|| no_method(record.model(), name))?;
    let association = registry.association_at(id)?;
    let instance = accessors::graph_for(registry, graph, record, &association.graph_role)?
        .ok_or_else(|| no_target(record.model(), &association.graph_role, name))?;
    let graph_class = registry.require_graph_class(instance.class())?;
    instance
        .get(graph_class, name)
        .ok_or_else(|| no_method(instance.class(), name))
}

/// Write `name` on a record
///
/// Native columns are assigned in memory. Delegated names load the linked
/// graph instance, assign and save it.
///
/// # Errors
///
/// As [`read_record_attribute`], plus value validation and store errors.
pub fn write_record_attribute<G: GraphStore + ?Sized>(
    registry: &ModelRegistry,
    graph: &G,
    record: &mut Record,
    name: &str,
    value: Value,
) -> Result<()> {
    let class = registry.require_relational(record.model())?;
    if class.column_named(name).is_some() {
        return record.set(class, name, value);
    }
    let id = class.delegation(name).ok_or_else(|| no_method(record.model(), name))?;
    let association = registry.association_at(id)?;
    let mut instance = accessors::graph_for(registry, graph, record, &association.graph_role)?
        .ok_or_else(|| no_target(record.model(), &association.graph_role, name))?;
    let graph_class = registry.require_graph_class(instance.class())?;
    instance.set(graph_class, name, value)?;
    graph_mapper::save(graph, graph_class, &instance)
}

fn no_method(model: &str, method: &str) -> IsographError {
    IsographError::NoMethod {
        model: model.to_string(),
        method: method.to_string(),
    }
}

fn no_target(model: &str, role: &str, attribute: &str) -> IsographError {
    IsographError::NoAssociationTarget {
        model: model.to_string(),
        role: role.to_string(),
        attribute: attribute.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;
    use crate::rdf::Iri;

    #[test]
    fn test_install_skips_names_the_target_already_answers() {
        let mut graph = GraphClass::new("IsomorphicPerson")
            .with_property(
                "name",
                Iri::parse("http://xmlns.com/foaf/0.1/name").unwrap(),
                ValueType::Text,
            )
            .with_property(
                "email",
                Iri::parse("http://xmlns.com/foaf/0.1/mbox").unwrap(),
                ValueType::Text,
            );
        let mut relational = RelationalClass::new("User", "users")
            .column("email", ValueType::Text)
            .column("encrypted_password", ValueType::Text);

        let counts = install(&mut graph, &mut relational, AssociationId(0));

        let to_graph: Vec<&str> = graph.delegated_attributes().collect();
        assert_eq!(to_graph, vec!["encrypted_password", "id"]);
        let to_relational: Vec<&str> = relational.delegated_attributes().collect();
        assert_eq!(to_relational, vec!["name"]);
        assert_eq!(counts, (2, 1));
    }
}
