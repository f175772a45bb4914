//! Call surface over a registry and a pair of stores
//!
//! ## Logging Ownership
//!
//! `Session` owns lifecycle logging for every cross-store operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Registry, accessor, mapper and store code uses only `tracing::debug!()`.

use std::time::Instant;

use isograph_core_types::RequestContext;

use crate::association::{accessors, delegation};
use crate::errors::Result;
use crate::model::{Attributes, GraphInstance, ModelMut, ModelRef, Record, Value};
use crate::registry::ModelRegistry;
use crate::store::{graph_mapper, GraphStore, RelationalStore};
use crate::{log_op_end, log_op_error, log_op_start};

/// A registry bound to one relational store and one graph store
///
/// Stores are taken by value; pass references (`&store`) to share them.
pub struct Session<'r, R, G> {
    registry: &'r ModelRegistry,
    relational: R,
    graph: G,
    context: RequestContext,
}

impl<'r, R: RelationalStore, G: GraphStore> Session<'r, R, G> {
    pub fn new(registry: &'r ModelRegistry, relational: R, graph: G) -> Self {
        Self {
            registry,
            relational,
            graph,
            context: RequestContext::new(),
        }
    }

    /// Attach correlation ids reported on every lifecycle event
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.registry
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn relational_store(&self) -> &R {
        &self.relational
    }

    pub fn graph_store(&self) -> &G {
        &self.graph
    }

    fn boundary<T>(&self, op: &'static str, model: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let request_id = self.context.request_id.as_str();
        log_op_start!(op, model = model, request_id = request_id);
        let start = Instant::now();

        let result = f().map_err(|e| {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                model = model,
                request_id = request_id
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            model = model,
            request_id = request_id
        );
        Ok(result)
    }

    // ===== Cross-store accessors =====

    /// `instance.<role>`
    ///
    /// # Errors
    ///
    /// `NoMethod` for an unknown role, `RecordNotFound` for a dangling key.
    pub fn related(&self, instance: &GraphInstance, role: &str) -> Result<Option<Record>> {
        self.boundary("related", instance.class(), || {
            accessors::related(self.registry, &self.relational, instance, role)
        })
    }

    /// `instance.<role> = value`, in memory only; follow with [`Session::save_graph`]
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for anything but a record of the registered type.
    pub fn relate(
        &self,
        instance: &mut GraphInstance,
        role: &str,
        value: Option<ModelRef<'_>>,
    ) -> Result<()> {
        let model = instance.class().to_string();
        self.boundary("relate", &model, || {
            accessors::relate(self.registry, instance, role, value)
        })
    }

    /// `record.<graph_role>`
    ///
    /// # Errors
    ///
    /// `NoMethod` for an unknown reverse accessor; store errors propagate.
    pub fn graph_for(&self, record: &Record, graph_role: &str) -> Result<Option<GraphInstance>> {
        self.boundary("graph_for", record.model(), || {
            accessors::graph_for(self.registry, &self.graph, record, graph_role)
        })
    }

    /// `record.<graph_role> = value`; persists every instance it touches
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for anything but an instance of the registered class.
    pub fn relate_graph(
        &self,
        record: &Record,
        graph_role: &str,
        value: Option<ModelMut<'_>>,
    ) -> Result<()> {
        self.boundary("relate_graph", record.model(), || {
            accessors::relate_graph(self.registry, &self.graph, record, graph_role, value)
        })
    }

    // ===== Attributes, native or delegated =====

    /// # Errors
    ///
    /// `NoMethod` / `NoAssociationTarget`, see [`delegation::read_graph_attribute`].
    pub fn read_graph_attr(&self, instance: &GraphInstance, name: &str) -> Result<Value> {
        self.boundary("read_graph_attr", instance.class(), || {
            delegation::read_graph_attribute(self.registry, &self.relational, instance, name)
        })
    }

    /// # Errors
    ///
    /// See [`delegation::write_graph_attribute`].
    pub fn write_graph_attr(
        &self,
        instance: &mut GraphInstance,
        name: &str,
        value: Value,
    ) -> Result<()> {
        let model = instance.class().to_string();
        self.boundary("write_graph_attr", &model, || {
            delegation::write_graph_attribute(self.registry, &self.relational, instance, name, value)
        })
    }

    /// # Errors
    ///
    /// See [`delegation::read_record_attribute`].
    pub fn read_record_attr(&self, record: &Record, name: &str) -> Result<Value> {
        self.boundary("read_record_attr", record.model(), || {
            delegation::read_record_attribute(self.registry, &self.graph, record, name)
        })
    }

    /// # Errors
    ///
    /// See [`delegation::write_record_attribute`].
    pub fn write_record_attr(&self, record: &mut Record, name: &str, value: Value) -> Result<()> {
        let model = record.model().to_string();
        self.boundary("write_record_attr", &model, || {
            delegation::write_record_attribute(self.registry, &self.graph, record, name, value)
        })
    }

    // ===== Graph instances =====

    /// Load the instance of `graph_class` named `local` (or an absolute IRI)
    ///
    /// # Errors
    ///
    /// `UnknownModelType` for an unregistered class, `InvalidIri` for a bad name.
    pub fn graph_for_subject(&self, graph_class: &str, local: &str) -> Result<GraphInstance> {
        self.boundary("graph_for_subject", graph_class, || {
            let class = self.registry.require_graph_class(graph_class)?;
            graph_mapper::load(&self.graph, class, class.subject_for(local)?)
        })
    }

    /// # Errors
    ///
    /// `UnknownModelType` for an unregistered class; store errors propagate.
    pub fn save_graph(&self, instance: &GraphInstance) -> Result<()> {
        self.boundary("save_graph", instance.class(), || {
            let class = self.registry.require_graph_class(instance.class())?;
            graph_mapper::save(&self.graph, class, instance)
        })
    }

    // ===== Records =====

    /// # Errors
    ///
    /// `UnknownModelType`, attribute validation or store errors.
    pub fn create_record(&self, model: &str, attributes: Attributes) -> Result<Record> {
        self.boundary("create_record", model, || {
            let class = self.registry.require_relational(model)?;
            self.relational.create(class, attributes)
        })
    }

    /// # Errors
    ///
    /// `RecordNotFound` if the row does not exist.
    pub fn find_record(&self, model: &str, id: i64) -> Result<Record> {
        self.boundary("find_record", model, || {
            let class = self.registry.require_relational(model)?;
            self.relational.find(class, id)
        })
    }

    /// # Errors
    ///
    /// `RecordNotFound` if the row is gone; store errors propagate.
    pub fn save_record(&self, record: &Record) -> Result<()> {
        self.boundary("save_record", record.model(), || {
            let class = self.registry.require_relational(record.model())?;
            self.relational.update(class, record)
        })
    }

    /// Delete a row; graph instances still pointing at it keep a dangling key
    ///
    /// # Errors
    ///
    /// `RecordNotFound` if the row does not exist.
    pub fn delete_record(&self, model: &str, id: i64) -> Result<()> {
        self.boundary("delete_record", model, || {
            let class = self.registry.require_relational(model)?;
            self.relational.delete(class, id)
        })
    }
}
