use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::relational::Attributes;
use super::value::{Value, ValueType};
use crate::association::AssociationId;
use crate::errors::{IsographError, Result};
use crate::rdf::{Iri, Vocabulary};

/// A property in a graph class schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    pub predicate: Iri,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

/// Graph model type: a named property schema over a triple store
///
/// Registration mutates a class (new properties, accessors, delegations)
/// while the registry is being built; once the registry is shared the class
/// is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphClass {
    name: String,
    parent: Option<String>,
    base_uri: Option<Iri>,
    default_vocabulary: Option<Vocabulary>,
    rdf_type: Option<Iri>,
    properties: Vec<PropertySpec>,
    pub(crate) accessors: BTreeMap<String, AssociationId>,
    pub(crate) delegations: BTreeMap<String, AssociationId>,
}

impl GraphClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            base_uri: None,
            default_vocabulary: None,
            rdf_type: None,
            properties: Vec::new(),
            accessors: BTreeMap::new(),
            delegations: BTreeMap::new(),
        }
    }

    /// Subclass: inherits base URI, vocabulary, rdf type and properties
    ///
    /// Associations are not inherited; isomorphisms declared on the subclass
    /// leave the parent's schema untouched.
    pub fn extending(name: impl Into<String>, parent: &GraphClass) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.name.clone()),
            base_uri: parent.base_uri.clone(),
            default_vocabulary: parent.default_vocabulary.clone(),
            rdf_type: parent.rdf_type.clone(),
            properties: parent.properties.clone(),
            accessors: BTreeMap::new(),
            delegations: BTreeMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidIri` if `base_uri` is not absolute.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Result<Self> {
        self.base_uri = Some(Iri::parse(base_uri)?);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidIri` if `vocabulary` is not absolute.
    pub fn with_default_vocabulary(mut self, vocabulary: impl Into<String>) -> Result<Self> {
        self.default_vocabulary = Some(Vocabulary::new(vocabulary)?);
        Ok(self)
    }

    pub fn with_rdf_type(mut self, rdf_type: Iri) -> Self {
        self.rdf_type = Some(rdf_type);
        self
    }

    /// Declare a property with an explicit predicate; redeclaring replaces
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        predicate: Iri,
        value_type: ValueType,
    ) -> Self {
        self.insert_property(PropertySpec {
            name: name.into(),
            predicate,
            value_type,
        });
        self
    }

    /// Declare a property whose predicate is minted from the default vocabulary
    ///
    /// # Errors
    ///
    /// `NoDefaultVocabulary` when the class has none.
    pub fn with_vocabulary_property(
        self,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Result<Self> {
        let name = name.into();
        let predicate = self.vocabulary_term(&name)?;
        Ok(self.with_property(name, predicate, value_type))
    }

    pub(crate) fn insert_property(&mut self, property: PropertySpec) {
        self.properties.retain(|p| p.name != property.name);
        self.properties.push(property);
    }

    pub(crate) fn vocabulary_term(&self, local: &str) -> Result<Iri> {
        self.default_vocabulary
            .as_ref()
            .ok_or_else(|| IsographError::NoDefaultVocabulary {
                graph_class: self.name.clone(),
            })?
            .term(local)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn base_uri(&self) -> Option<&Iri> {
        self.base_uri.as_ref()
    }

    pub fn default_vocabulary(&self) -> Option<&Vocabulary> {
        self.default_vocabulary.as_ref()
    }

    pub fn rdf_type(&self) -> Option<&Iri> {
        self.rdf_type.as_ref()
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }

    /// Forward accessor names (`user`) installed by isomorphisms
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn accessor(&self, role: &str) -> Option<AssociationId> {
        self.accessors.get(role).copied()
    }

    pub fn delegated_attributes(&self) -> impl Iterator<Item = &str> {
        self.delegations.keys().map(String::as_str)
    }

    pub fn delegation(&self, attribute: &str) -> Option<AssociationId> {
        self.delegations.get(attribute).copied()
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.property(name).is_some()
            || self.accessors.contains_key(name)
            || self.delegations.contains_key(name)
    }

    /// Identity for `local`: absolute IRIs pass through, anything else is
    /// appended to the base URI
    ///
    /// # Errors
    ///
    /// `InvalidIri` if `local` is relative and the class has no base URI.
    pub fn subject_for(&self, local: &str) -> Result<Iri> {
        if Iri::is_absolute(local) {
            return Iri::parse(local);
        }
        let base = self.base_uri.as_ref().ok_or_else(|| IsographError::InvalidIri {
            iri: local.to_string(),
            reason: format!("{} has no base URI to resolve against", self.name),
        })?;
        let base = base.as_str().trim_end_matches('/');
        Iri::parse(format!("{}/{}", base, local.trim_start_matches('/')))
    }

    /// Fresh in-memory instance; every property starts null
    ///
    /// # Errors
    ///
    /// See [`GraphClass::subject_for`].
    pub fn instance_for(&self, local: &str) -> Result<GraphInstance> {
        Ok(GraphInstance::new(self.name.clone(), self.subject_for(local)?))
    }

    /// Instance with a generated subject under the base URI
    ///
    /// # Errors
    ///
    /// `InvalidIri` if the class has no base URI.
    pub fn mint_instance(&self) -> Result<GraphInstance> {
        self.instance_for(&uuid::Uuid::now_v7().to_string())
    }
}

/// An entity in the graph store, identified by its subject IRI
///
/// Equality is identity: same class and same subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInstance {
    class: String,
    subject: Iri,
    attributes: Attributes,
}

impl GraphInstance {
    pub fn new(class: impl Into<String>, subject: Iri) -> Self {
        Self {
            class: class.into(),
            subject,
            attributes: Attributes::new(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Read a schema property; `None` if `name` is not a property
    pub fn get(&self, class: &GraphClass, name: &str) -> Option<Value> {
        class
            .property(name)
            .map(|_| self.attributes.get(name).cloned().unwrap_or_default())
    }

    /// Assign a schema property in memory (saved by the session)
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` if `name` is not a property; `InvalidValue` on type mismatch.
    pub fn set(&mut self, class: &GraphClass, name: &str, value: Value) -> Result<()> {
        let property = class
            .property(name)
            .ok_or_else(|| IsographError::UnknownAttribute {
                model: self.class.clone(),
                attribute: name.to_string(),
            })?;
        let value = value.conform(name, property.value_type)?;
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn load_attribute(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }
}

impl PartialEq for GraphInstance {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.subject == other.subject
    }
}

impl Eq for GraphInstance {}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> GraphClass {
        GraphClass::new("Person")
            .with_base_uri("http://example.org/example/people")
            .unwrap()
            .with_default_vocabulary("http://example.org/example/vocab")
            .unwrap()
            .with_property(
                "name",
                Iri::parse("http://xmlns.com/foaf/0.1/name").unwrap(),
                ValueType::Text,
            )
    }

    #[test]
    fn test_subject_for_joins_base_uri() {
        assert_eq!(
            person().subject_for("bob").unwrap().as_str(),
            "http://example.org/example/people/bob"
        );
        assert_eq!(
            person().subject_for("urn:x:bob").unwrap().as_str(),
            "urn:x:bob"
        );
    }

    #[test]
    fn test_subject_for_without_base_uri_fails() {
        let err = GraphClass::new("Loose").subject_for("bob").unwrap_err();
        assert!(matches!(err, IsographError::InvalidIri { .. }));
    }

    #[test]
    fn test_extending_copies_schema_but_not_accessors() {
        let mut parent = person();
        parent.accessors.insert("user".into(), AssociationId(0));
        let child = GraphClass::extending("IsomorphicPerson", &parent);
        assert_eq!(child.parent(), Some("Person"));
        assert!(child.property("name").is_some());
        assert!(child.default_vocabulary().is_some());
        assert!(child.accessor("user").is_none());
    }

    #[test]
    fn test_vocabulary_property_mints_predicate() {
        let class = person()
            .with_vocabulary_property("nickname", ValueType::Text)
            .unwrap();
        assert_eq!(
            class.property("nickname").unwrap().predicate.as_str(),
            "http://example.org/example/vocab/nickname"
        );
        assert!(GraphClass::new("Bare")
            .with_vocabulary_property("x", ValueType::Text)
            .is_err());
    }

    #[test]
    fn test_instance_identity_equality() {
        let class = person();
        let mut a = class.instance_for("bob").unwrap();
        let b = class.instance_for("bob").unwrap();
        a.set(&class, "name", Value::from("Bob")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, class.instance_for("alice").unwrap());
    }

    #[test]
    fn test_set_rejects_unknown_property() {
        let class = person();
        let mut bob = class.instance_for("bob").unwrap();
        assert!(matches!(
            bob.set(&class, "email", Value::from("x")),
            Err(IsographError::UnknownAttribute { .. })
        ));
    }
}
