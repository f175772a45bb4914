use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::naming;
use super::value::{Value, ValueType};
use crate::association::AssociationId;
use crate::errors::{IsographError, Result};

/// Attribute map shared by records and graph instances
pub type Attributes = BTreeMap<String, Value>;

/// Row creation time, kept by the stores when a class declares it
pub const CREATED_AT: &str = "created_at";
/// Last update time, kept by the stores when a class declares it
pub const UPDATED_AT: &str = "updated_at";

/// One declared column (primary key excluded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Redacted when rendered for humans
    #[serde(default)]
    pub sensitive: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            sensitive: false,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Relational model type: a table with an auto-increment integer primary key
///
/// Besides its columns, a class carries the reverse accessors and delegated
/// attributes that isomorphisms install on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalClass {
    name: String,
    table: String,
    primary_key: String,
    columns: Vec<Column>,
    pub(crate) reverse_accessors: BTreeMap<String, AssociationId>,
    pub(crate) delegations: BTreeMap<String, AssociationId>,
}

impl RelationalClass {
    /// `name` is the type name (`User`); `table` the backing table (`users`)
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: "id".to_string(),
            columns: Vec::new(),
            reverse_accessors: BTreeMap::new(),
            delegations: BTreeMap::new(),
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.retain(|c| c.name != column.name);
        self.columns.push(column);
        self
    }

    pub fn column(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.with_column(Column::new(name, value_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry symbol: `User` -> `user`
    pub fn symbol(&self) -> String {
        naming::underscore(&self.name)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_named(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Native attribute names, primary key first
    pub fn attribute_names(&self) -> Vec<String> {
        std::iter::once(self.primary_key.clone())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        name == self.primary_key || self.column_named(name).is_some()
    }

    /// Reverse accessor names (`isomorphic_person`) installed by isomorphisms
    pub fn reverse_accessors(&self) -> impl Iterator<Item = &str> {
        self.reverse_accessors.keys().map(String::as_str)
    }

    pub fn reverse_accessor(&self, name: &str) -> Option<AssociationId> {
        self.reverse_accessors.get(name).copied()
    }

    pub fn delegated_attributes(&self) -> impl Iterator<Item = &str> {
        self.delegations.keys().map(String::as_str)
    }

    pub fn delegation(&self, attribute: &str) -> Option<AssociationId> {
        self.delegations.get(attribute).copied()
    }

    /// Anything callable on an instance: attribute, reverse accessor or delegation
    pub fn responds_to(&self, name: &str) -> bool {
        self.has_attribute(name)
            || self.reverse_accessors.contains_key(name)
            || self.delegations.contains_key(name)
    }

    /// Check and coerce `attributes` against the declared columns
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` for undeclared names (including the primary key,
    /// which the store assigns), `InvalidValue` for type mismatches.
    pub fn conform(&self, attributes: Attributes) -> Result<Attributes> {
        attributes
            .into_iter()
            .map(|(name, value)| {
                let column = self.column_named(&name).ok_or_else(|| {
                    IsographError::UnknownAttribute {
                        model: self.name.clone(),
                        attribute: name.clone(),
                    }
                })?;
                let value = value.conform(&name, column.value_type)?;
                Ok((name, value))
            })
            .collect()
    }

    /// Fill `created_at` (unless given) and `updated_at` on a new row
    ///
    /// Only text columns of those names are stamped, with RFC 3339 UTC time.
    pub fn stamp_created(&self, attributes: &mut Attributes) {
        let now = Value::from(chrono::Utc::now().to_rfc3339());
        for stamp in [CREATED_AT, UPDATED_AT] {
            if self.is_timestamp(stamp) {
                attributes
                    .entry(stamp.to_string())
                    .or_insert_with(|| now.clone());
            }
        }
    }

    /// Overwrite `updated_at` on a row about to be saved
    pub fn stamp_updated(&self, attributes: &mut Attributes) {
        if self.is_timestamp(UPDATED_AT) {
            attributes.insert(
                UPDATED_AT.to_string(),
                Value::from(chrono::Utc::now().to_rfc3339()),
            );
        }
    }

    fn is_timestamp(&self, name: &str) -> bool {
        self.column_named(name)
            .map_or(false, |c| c.value_type == ValueType::Text)
    }
}

/// A relational row
///
/// Equality is identity: same model type and same primary key. Unsaved
/// records (no id) are never equal to anything but themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    model: String,
    id: Option<i64>,
    attributes: Attributes,
}

impl Record {
    pub fn new(model: impl Into<String>, id: Option<i64>, attributes: Attributes) -> Self {
        Self {
            model: model.into(),
            id,
            attributes,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Read a native attribute; `id` reads the primary key
    pub fn get(&self, class: &RelationalClass, name: &str) -> Option<Value> {
        if name == class.primary_key() {
            return Some(Value::from(self.id));
        }
        if class.column_named(name).is_some() {
            return Some(self.attributes.get(name).cloned().unwrap_or_default());
        }
        None
    }

    /// Assign a native column value (not persisted until the store updates it)
    ///
    /// # Errors
    ///
    /// `UnknownAttribute` if `name` is not a column; `InvalidValue` if the
    /// type does not match.
    pub fn set(&mut self, class: &RelationalClass, name: &str, value: Value) -> Result<()> {
        let column = class
            .column_named(name)
            .ok_or_else(|| IsographError::UnknownAttribute {
                model: self.model.clone(),
                attribute: name.to_string(),
            })?;
        let value = value.conform(name, column.value_type)?;
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if self.model != other.model {
            return false;
        }
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => std::ptr::eq(self, other),
        }
    }
}
