//! Maps graph instances to and from statements
//!
//! One statement per non-null property, keyed by the property predicate.
//! Loading never fails for a missing subject: absent properties read as null,
//! so every IRI under a class names an (initially empty) instance.

use super::GraphStore;
use crate::errors::{IsographError, Result};
use crate::model::{GraphClass, GraphInstance, Value, ValueType};
use crate::rdf::{rdf, Iri, Statement, Term, TriplePattern};

/// Load the instance of `class` identified by `subject`
///
/// # Errors
///
/// `InvalidValue` when a stored literal does not parse as the property type;
/// store errors propagate.
pub fn load<G: GraphStore + ?Sized>(
    graph: &G,
    class: &GraphClass,
    subject: Iri,
) -> Result<GraphInstance> {
    let statements = graph.query(&TriplePattern::any().with_subject(subject.clone()))?;
    let mut instance = GraphInstance::new(class.name(), subject);

    for property in class.properties() {
        let object = statements
            .iter()
            .find(|s| s.predicate == property.predicate)
            .map(|s| &s.object);
        let value = match object {
            None => Value::Null,
            Some(Term::Literal(literal)) => {
                Value::from_literal(&property.name, literal, property.value_type)?
            }
            Some(Term::Iri(iri)) if property.value_type == ValueType::Text => {
                Value::Text(iri.as_str().to_string())
            }
            Some(Term::Iri(iri)) => {
                return Err(IsographError::InvalidValue {
                    attribute: property.name.clone(),
                    expected: property.value_type.to_string(),
                    actual: iri.to_string(),
                })
            }
        };
        instance.load_attribute(&property.name, value);
    }

    tracing::debug!(
        graph_class = class.name(),
        subject = instance.subject().as_str(),
        statements = statements.len(),
        "loaded graph instance"
    );
    Ok(instance)
}

/// Persist every schema property of `instance`
///
/// Each property's statements are replaced wholesale; a null value leaves
/// none. Statements outside the schema are left alone.
///
/// # Errors
///
/// Store errors propagate.
pub fn save<G: GraphStore + ?Sized>(
    graph: &G,
    class: &GraphClass,
    instance: &GraphInstance,
) -> Result<()> {
    let subject = instance.subject();

    for property in class.properties() {
        graph.remove(
            &TriplePattern::any()
                .with_subject(subject.clone())
                .with_predicate(property.predicate.clone()),
        )?;
        let value = instance.get(class, &property.name).unwrap_or_default();
        if let Some(literal) = value.to_literal() {
            graph.insert(&Statement::new(
                subject.clone(),
                property.predicate.clone(),
                literal,
            ))?;
        }
    }

    if let Some(rdf_type) = class.rdf_type() {
        graph.insert(&Statement::new(
            subject.clone(),
            rdf::type_(),
            rdf_type.clone(),
        ))?;
    }

    tracing::debug!(
        graph_class = class.name(),
        subject = subject.as_str(),
        "saved graph instance"
    );
    Ok(())
}
