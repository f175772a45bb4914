pub mod graph;
pub mod naming;
pub mod relational;
pub mod value;

pub use graph::{GraphClass, GraphInstance, PropertySpec};
pub use relational::{Attributes, Column, Record, RelationalClass, CREATED_AT, UPDATED_AT};
pub use value::{Value, ValueType};

/// Borrowed model of either kind, as accepted by the cross-store setters
///
/// Setters check the runtime type name strictly: a subclass instance or a
/// record of another table is a `TypeMismatch`.
#[derive(Debug, Clone, Copy)]
pub enum ModelRef<'a> {
    Record(&'a Record),
    Graph(&'a GraphInstance),
}

impl ModelRef<'_> {
    /// Runtime type name (`User`, `IsomorphicPerson`)
    pub fn type_name(&self) -> &str {
        match self {
            ModelRef::Record(record) => record.model(),
            ModelRef::Graph(instance) => instance.class(),
        }
    }
}

impl<'a> From<&'a Record> for ModelRef<'a> {
    fn from(record: &'a Record) -> Self {
        ModelRef::Record(record)
    }
}

impl<'a> From<&'a GraphInstance> for ModelRef<'a> {
    fn from(instance: &'a GraphInstance) -> Self {
        ModelRef::Graph(instance)
    }
}

/// Mutable counterpart of [`ModelRef`], for setters that write through the value
#[derive(Debug)]
pub enum ModelMut<'a> {
    Record(&'a mut Record),
    Graph(&'a mut GraphInstance),
}

impl ModelMut<'_> {
    pub fn type_name(&self) -> &str {
        match self {
            ModelMut::Record(record) => record.model(),
            ModelMut::Graph(instance) => instance.class(),
        }
    }
}

impl<'a> From<&'a mut Record> for ModelMut<'a> {
    fn from(record: &'a mut Record) -> Self {
        ModelMut::Record(record)
    }
}

impl<'a> From<&'a mut GraphInstance> for ModelMut<'a> {
    fn from(instance: &'a mut GraphInstance) -> Self {
        ModelMut::Graph(instance)
    }
}
