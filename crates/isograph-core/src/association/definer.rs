//! Isomorphism registration
//!
//! Declaring `IsomorphicPerson` isomorphic to `:user`:
//!
//! 1. the graph class must have a default vocabulary
//! 2. `user_id` must not already be a property (nor `user` an accessor)
//! 3. `:user` must resolve in the registry
//! 4. `isomorphic_person` must be free on `User`
//! 5. no other association on `User` may use the same `user_id` predicate
//!
//! Every check runs before anything is mutated, so a failed declaration
//! leaves both classes exactly as they were. On success the graph class
//! gains the nullable integer property `user_id` and the accessor `user`,
//! `User` gains the reverse accessor `isomorphic_person`, and forwarding
//! tables are built when delegation is on.

use super::{delegation, Association, AssociationId, IsomorphismOptions};
use crate::errors::{IsographError, Result};
use crate::model::{naming, PropertySpec, ValueType};
use crate::registry::ModelRegistry;

impl ModelRegistry {
    /// Declare `graph_class` isomorphic to the relational model `relational`
    ///
    /// `relational` is a symbol (`user`) or type name (`User`); the role and
    /// foreign key are derived from its underscored form.
    ///
    /// # Errors
    ///
    /// - `UnknownModelType` if `graph_class` is not registered
    /// - `NoDefaultVocabulary` if the graph class has no default vocabulary
    /// - `IsomorphismAlreadyDefined` if the foreign key or either accessor name is
    ///   taken, or another graph class links the same relational model through
    ///   the same predicate
    /// - `UnknownModelType` naming `relational` if it does not resolve
    pub fn define_isomorphism(
        &mut self,
        graph_class: &str,
        relational: &str,
        options: IsomorphismOptions,
    ) -> Result<AssociationId> {
        let role = naming::underscore(relational);
        let foreign_key = naming::foreign_key(&role);
        let graph_role = naming::underscore(graph_class);

        let graph = self.require_graph_class(graph_class)?;
        if graph.default_vocabulary().is_none() {
            return Err(IsographError::NoDefaultVocabulary {
                graph_class: graph_class.to_string(),
            });
        }
        if !naming::is_identifier(&role) {
            return Err(IsographError::UnknownModelType {
                symbol: relational.to_string(),
            });
        }
        if graph.property(&foreign_key).is_some() || graph.responds_to(&role) {
            return Err(IsographError::IsomorphismAlreadyDefined {
                relational: role,
                property: foreign_key,
            });
        }
        let predicate = graph.vocabulary_term(&foreign_key)?;

        let target = self.relational_by_symbol(relational)?;
        if target.responds_to(&graph_role) {
            return Err(IsographError::IsomorphismAlreadyDefined {
                relational: role,
                property: graph_role,
            });
        }
        // Reverse lookups query by predicate alone, so a second graph class
        // using the same foreign-key predicate would see the first one's links
        let predicate_taken = target
            .reverse_accessors
            .values()
            .filter_map(|id| self.associations.get(id.0))
            .any(|existing| existing.predicate == predicate);
        if predicate_taken {
            return Err(IsographError::IsomorphismAlreadyDefined {
                relational: role,
                property: foreign_key,
            });
        }
        let relational_name = target.name().to_string();

        let id = AssociationId(self.associations.len());
        let (Some(graph), Some(target)) = (
            self.graph.get_mut(graph_class),
            self.relational.get_mut(&relational_name),
        ) else {
            return Err(IsographError::Internal {
                message: format!("{graph_class} or {relational_name} vanished during registration"),
            });
        };

        graph.insert_property(PropertySpec {
            name: foreign_key.clone(),
            predicate: predicate.clone(),
            value_type: ValueType::Integer,
        });
        graph.accessors.insert(role.clone(), id);
        target.reverse_accessors.insert(graph_role.clone(), id);

        let forwarded = if options.delegation {
            delegation::install(graph, target, id)
        } else {
            (0, 0)
        };

        tracing::debug!(
            graph_class,
            relational_model = %relational_name,
            role = %role,
            foreign_key = %foreign_key,
            delegation = options.delegation,
            forwarded_to_graph = forwarded.0,
            forwarded_to_relational = forwarded.1,
            "defined isomorphism"
        );

        self.associations.push(Association {
            id,
            graph_class: graph_class.to_string(),
            relational_class: relational_name,
            role,
            foreign_key,
            graph_role,
            predicate,
            delegation: options.delegation,
        });
        Ok(id)
    }
}
