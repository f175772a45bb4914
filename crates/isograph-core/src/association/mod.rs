//! Isomorphisms between a graph class and a relational class
//!
//! An [`Association`] is created once, at registration, by the definer and
//! never changes afterwards. Runtime behaviour lives in [`accessors`] (the
//! four cross-store operations) and [`delegation`] (attribute forwarding).

pub mod accessors;
pub mod definer;
pub mod delegation;

use serde::{Deserialize, Serialize};

use crate::rdf::Iri;

/// Index of an association in its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssociationId(pub(crate) usize);

/// Options accepted by an isomorphism declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsomorphismOptions {
    /// Install attribute forwarding in both directions
    #[serde(default = "default_delegation")]
    pub delegation: bool,
}

fn default_delegation() -> bool {
    true
}

impl Default for IsomorphismOptions {
    fn default() -> Self {
        Self {
            delegation: default_delegation(),
        }
    }
}

impl IsomorphismOptions {
    pub fn without_delegation() -> Self {
        Self { delegation: false }
    }
}

/// Registered link between one graph class and one relational class
///
/// Names are derived at registration: for `IsomorphicPerson` and `:user`,
/// `role` is `user`, `foreign_key` is `user_id` and `graph_role` is
/// `isomorphic_person`.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub(crate) id: AssociationId,
    pub(crate) graph_class: String,
    pub(crate) relational_class: String,
    pub(crate) role: String,
    pub(crate) foreign_key: String,
    pub(crate) graph_role: String,
    pub(crate) predicate: Iri,
    pub(crate) delegation: bool,
}

impl Association {
    pub fn id(&self) -> AssociationId {
        self.id
    }

    pub fn graph_class(&self) -> &str {
        &self.graph_class
    }

    pub fn relational_class(&self) -> &str {
        &self.relational_class
    }

    /// Accessor name on the graph class
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Integer property on the graph class holding the record id
    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    /// Reverse accessor name on the relational class
    pub fn graph_role(&self) -> &str {
        &self.graph_role
    }

    /// Predicate of the foreign-key property, used by the reverse query
    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    pub fn delegation(&self) -> bool {
        self.delegation
    }
}
