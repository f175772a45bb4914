//! Declarative schema file
//!
//! ```toml
//! [[relational]]
//! name = "User"
//! table = "users"
//! columns = [{ name = "email", type = "text" }]
//!
//! [[graph]]
//! name = "Person"
//! base_uri = "http://example.org/example/people"
//! default_vocabulary = "http://example.org/example/vocab"
//! properties = [{ name = "name", type = "text", predicate = "http://xmlns.com/foaf/0.1/name" }]
//!
//! [[graph]]
//! name = "IsomorphicPerson"
//! extends = "Person"
//!
//! [[isomorphism]]
//! graph = "IsomorphicPerson"
//! relational = "user"
//! ```
//!
//! Declarations replay through the ordinary registration calls, in file
//! order, so a bad file fails with the same errors as bad code.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::association::IsomorphismOptions;
use crate::errors::{IsographError, Result};
use crate::model::{Column, GraphClass, RelationalClass, ValueType};
use crate::rdf::Iri;
use crate::registry::ModelRegistry;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub relational: Vec<RelationalConfig>,
    #[serde(default)]
    pub graph: Vec<GraphConfig>,
    #[serde(default)]
    pub isomorphism: Vec<IsomorphismConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationalConfig {
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub default_vocabulary: Option<String>,
    #[serde(default)]
    pub rdf_type: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyConfig>,
}

/// Property declaration; without `predicate` the default vocabulary mints one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub predicate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsomorphismConfig {
    pub graph: String,
    pub relational: String,
    #[serde(default)]
    pub delegation: Option<bool>,
}

impl IsomorphismConfig {
    pub fn options(&self) -> IsomorphismOptions {
        self.delegation
            .map_or_else(IsomorphismOptions::default, |delegation| IsomorphismOptions {
                delegation,
            })
    }
}

impl SchemaConfig {
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| IsographError::Io {
            op: format!("read {}", path.display()),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}

impl RelationalConfig {
    fn build(&self) -> RelationalClass {
        let mut class = RelationalClass::new(&self.name, &self.table);
        if let Some(pk) = &self.primary_key {
            class = class.with_primary_key(pk);
        }
        self.columns
            .iter()
            .cloned()
            .fold(class, RelationalClass::with_column)
    }
}

impl GraphConfig {
    fn build(&self, registry: &ModelRegistry) -> Result<GraphClass> {
        let mut class = match &self.extends {
            None => GraphClass::new(&self.name),
            Some(parent) => {
                let parent = registry.graph_class(parent).ok_or_else(|| {
                    IsographError::InvalidConfig {
                        message: format!(
                            "graph class {} extends {}, which is not declared before it",
                            self.name, parent
                        ),
                    }
                })?;
                GraphClass::extending(&self.name, parent)
            }
        };
        if let Some(base_uri) = &self.base_uri {
            class = class.with_base_uri(base_uri)?;
        }
        if let Some(vocabulary) = &self.default_vocabulary {
            class = class.with_default_vocabulary(vocabulary)?;
        }
        if let Some(rdf_type) = &self.rdf_type {
            class = class.with_rdf_type(Iri::parse(rdf_type)?);
        }
        for property in &self.properties {
            class = match &property.predicate {
                Some(predicate) => {
                    class.with_property(&property.name, Iri::parse(predicate)?, property.value_type)
                }
                None => class.with_vocabulary_property(&property.name, property.value_type)?,
            };
        }
        Ok(class)
    }
}

impl ModelRegistry {
    /// Build a registry from a schema file's declarations
    ///
    /// # Errors
    ///
    /// Any registration error (`DuplicateModel`, `NoDefaultVocabulary`,
    /// `IsomorphismAlreadyDefined`, `UnknownModelType`), `InvalidIri`, or
    /// `InvalidConfig` for a subclass declared before its parent.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        let mut registry = ModelRegistry::new();
        for relational in &config.relational {
            registry.register_relational(relational.build())?;
        }
        for graph in &config.graph {
            let class = graph.build(&registry)?;
            registry.register_graph(class)?;
        }
        for isomorphism in &config.isomorphism {
            registry.define_isomorphism(
                &isomorphism.graph,
                &isomorphism.relational,
                isomorphism.options(),
            )?;
        }
        tracing::debug!(
            relational = config.relational.len(),
            graph = config.graph.len(),
            isomorphisms = config.isomorphism.len(),
            "built registry from config"
        );
        Ok(registry)
    }
}
