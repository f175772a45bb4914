//! Isograph Core - isomorphisms between relational records and graph instances
//!
//! This crate provides:
//! - Relational and graph model descriptors with typed attribute values
//! - A minimal RDF term model (IRIs, literals, statements, patterns)
//! - Store traits with in-memory implementations and a graph mapper
//! - The model registry and isomorphism definer
//! - Cross-store accessors and attribute delegation
//! - `Session`, the logged call surface over a registry and two stores
//! - TOML schema configuration
//!
//! ```
//! use isograph_core::{
//!     GraphClass, IsomorphismOptions, MemoryGraphStore, MemoryRelationalStore, ModelRegistry,
//!     RelationalClass, Session, Value, ValueType,
//! };
//!
//! # fn main() -> isograph_core::Result<()> {
//! let mut registry = ModelRegistry::new();
//! registry.register_relational(RelationalClass::new("User", "users").column("email", ValueType::Text))?;
//! registry.register_graph(
//!     GraphClass::new("IsomorphicPerson")
//!         .with_base_uri("http://example.org/example/people")?
//!         .with_default_vocabulary("http://example.org/example/vocab")?,
//! )?;
//! registry.define_isomorphism("IsomorphicPerson", "user", IsomorphismOptions::default())?;
//!
//! let (users, graph) = (MemoryRelationalStore::new(), MemoryGraphStore::new());
//! let session = Session::new(&registry, &users, &graph);
//!
//! let mut attrs = isograph_core::Attributes::new();
//! attrs.insert("email".into(), Value::from("bob@example.com"));
//! let user = session.create_record("User", attrs)?;
//!
//! let mut bob = session.graph_for_subject("IsomorphicPerson", "bob")?;
//! session.relate(&mut bob, "user", Some((&user).into()))?;
//! session.save_graph(&bob)?;
//!
//! assert_eq!(session.read_graph_attr(&bob, "email")?, Value::from("bob@example.com"));
//! assert_eq!(session.graph_for(&user, "isomorphic_person")?, Some(bob));
//! # Ok(())
//! # }
//! ```

pub mod association;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rdf;
pub mod registry;
pub mod session;
pub mod store;

// Macros expand to `$crate::isograph_core_types::schema::*`
pub use isograph_core_types;

// Re-export commonly used types
pub use association::{Association, AssociationId, IsomorphismOptions};
pub use config::SchemaConfig;
pub use errors::{ExError, ExErrorKind, IsographError, Result};
pub use model::{
    Attributes, Column, GraphClass, GraphInstance, ModelMut, ModelRef, Record, RelationalClass,
    Value, ValueType,
};
pub use rdf::{Iri, Literal, Statement, Term, TriplePattern, Vocabulary};
pub use registry::ModelRegistry;
pub use session::Session;
pub use store::{GraphStore, MemoryGraphStore, MemoryRelationalStore, RelationalStore};
