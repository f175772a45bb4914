//! Model registry
//!
//! Explicit mapping from model names and symbols to class descriptors,
//! populated at startup and read-only once handed to a `Session`.
//! Lookups fail closed: an unregistered symbol is `UnknownModelType`.

use std::collections::BTreeMap;

use crate::association::{Association, AssociationId};
use crate::errors::{IsographError, Result};
use crate::model::{naming, GraphClass, RelationalClass};

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    pub(crate) relational: BTreeMap<String, RelationalClass>,
    pub(crate) graph: BTreeMap<String, GraphClass>,
    pub(crate) associations: Vec<Association>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// `DuplicateModel` if a relational class with the same name or symbol
    /// is already registered.
    pub fn register_relational(&mut self, class: RelationalClass) -> Result<()> {
        let symbol = class.symbol();
        if self
            .relational
            .values()
            .any(|c| c.name() == class.name() || c.symbol() == symbol)
        {
            return Err(IsographError::DuplicateModel {
                name: class.name().to_string(),
            });
        }
        tracing::debug!(
            relational_model = class.name(),
            table = class.table(),
            "registered relational class"
        );
        self.relational.insert(class.name().to_string(), class);
        Ok(())
    }

    /// # Errors
    ///
    /// `DuplicateModel` if a graph class with the same name is registered.
    pub fn register_graph(&mut self, class: GraphClass) -> Result<()> {
        if self.graph.contains_key(class.name()) {
            return Err(IsographError::DuplicateModel {
                name: class.name().to_string(),
            });
        }
        tracing::debug!(graph_class = class.name(), "registered graph class");
        self.graph.insert(class.name().to_string(), class);
        Ok(())
    }

    pub fn relational(&self, name: &str) -> Option<&RelationalClass> {
        self.relational.get(name)
    }

    /// Resolve a symbol (`user`) or type name (`User`) to its class
    ///
    /// # Errors
    ///
    /// `UnknownModelType` naming `symbol` when nothing matches.
    pub fn relational_by_symbol(&self, symbol: &str) -> Result<&RelationalClass> {
        let wanted = naming::underscore(symbol);
        self.relational
            .values()
            .find(|c| c.symbol() == wanted)
            .ok_or_else(|| IsographError::UnknownModelType {
                symbol: symbol.to_string(),
            })
    }

    pub fn graph_class(&self, name: &str) -> Option<&GraphClass> {
        self.graph.get(name)
    }

    /// # Errors
    ///
    /// `UnknownModelType` if no graph class is registered as `name`.
    pub fn require_graph_class(&self, name: &str) -> Result<&GraphClass> {
        self.graph
            .get(name)
            .ok_or_else(|| IsographError::UnknownModelType {
                symbol: naming::underscore(name),
            })
    }

    /// # Errors
    ///
    /// `UnknownModelType` if no relational class is registered as `name`.
    pub fn require_relational(&self, name: &str) -> Result<&RelationalClass> {
        self.relational
            .get(name)
            .ok_or_else(|| IsographError::UnknownModelType {
                symbol: naming::underscore(name),
            })
    }

    pub fn relational_classes(&self) -> impl Iterator<Item = &RelationalClass> {
        self.relational.values()
    }

    pub fn graph_classes(&self) -> impl Iterator<Item = &GraphClass> {
        self.graph.values()
    }

    /// Every association, in registration order
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// The association installed on `graph_class` under `role`
    pub fn association(&self, graph_class: &str, role: &str) -> Option<&Association> {
        self.graph
            .get(graph_class)?
            .accessor(role)
            .and_then(|id| self.associations.get(id.0))
    }

    pub(crate) fn association_at(&self, id: AssociationId) -> Result<&Association> {
        self.associations
            .get(id.0)
            .ok_or_else(|| IsographError::Internal {
                message: format!("association {} is not registered", id.0),
            })
    }

    /// Graph class and association behind `graph_class.<role>`
    pub(crate) fn forward(&self, graph_class: &str, role: &str) -> Result<(&GraphClass, &Association)> {
        let class = self.require_graph_class(graph_class)?;
        let id = class.accessor(role).ok_or_else(|| IsographError::NoMethod {
            model: graph_class.to_string(),
            method: role.to_string(),
        })?;
        Ok((class, self.association_at(id)?))
    }

    /// Association and graph class behind `model.<graph_role>`
    pub(crate) fn reverse(&self, model: &str, graph_role: &str) -> Result<(&Association, &GraphClass)> {
        let class = self.require_relational(model)?;
        let id = class
            .reverse_accessor(graph_role)
            .ok_or_else(|| IsographError::NoMethod {
                model: model.to_string(),
                method: graph_role.to_string(),
            })?;
        let association = self.association_at(id)?;
        Ok((association, self.require_graph_class(&association.graph_class)?))
    }

    pub(crate) fn relational_of(&self, association: &Association) -> Result<&RelationalClass> {
        self.require_relational(&association.relational_class)
    }
}
