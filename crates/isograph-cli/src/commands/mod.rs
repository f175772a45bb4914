//! Subcommands and the plumbing they share

pub mod graph;
pub mod migrate;
pub mod record;
pub mod schema;

use anyhow::{bail, Context};
use isograph_core::isograph_core_types::Sensitive;
use isograph_core::{
    Attributes, IsographError, ModelRegistry, RelationalClass, SchemaConfig, Session, Value,
    ValueType,
};
use isograph_store::{SqliteGraphStore, SqliteRelationalStore};
use rusqlite::Connection;
use std::path::PathBuf;

/// Flags accepted by every subcommand
#[derive(Debug, Clone)]
pub struct Globals {
    pub db: PathBuf,
    pub schema: PathBuf,
}

pub type SqliteSession<'a> = Session<'a, SqliteRelationalStore<'a>, SqliteGraphStore<'a>>;

impl Globals {
    pub fn registry(&self) -> anyhow::Result<ModelRegistry> {
        let config = SchemaConfig::load(&self.schema)
            .with_context(|| format!("loading schema {}", self.schema.display()))?;
        Ok(ModelRegistry::from_config(&config)?)
    }

    /// Open the database; `migrate` must have run against it
    pub fn connection(&self) -> anyhow::Result<Connection> {
        isograph_store::db::open(&self.db)
            .with_context(|| format!("opening database {}", self.db.display()))
    }
}

pub fn session<'a>(registry: &'a ModelRegistry, conn: &'a Connection) -> SqliteSession<'a> {
    Session::new(
        registry,
        SqliteRelationalStore::new(conn),
        SqliteGraphStore::new(conn),
    )
}

/// Parse `key=value` arguments against the class's columns
///
/// The literal `null` stands for a null value of any type.
pub fn parse_assignments(class: &RelationalClass, pairs: &[String]) -> anyhow::Result<Attributes> {
    let mut attributes = Attributes::new();
    for pair in pairs {
        let Some((name, raw)) = pair.split_once('=') else {
            bail!("expected KEY=VALUE, got `{}`", pair);
        };
        let column = class
            .column_named(name)
            .ok_or_else(|| IsographError::UnknownAttribute {
                model: class.name().to_string(),
                attribute: name.to_string(),
            })?;
        attributes.insert(name.to_string(), parse_value(name, raw, column.value_type)?);
    }
    Ok(attributes)
}

pub fn parse_value(name: &str, raw: &str, value_type: ValueType) -> anyhow::Result<Value> {
    if raw == "null" {
        return Ok(Value::Null);
    }
    let value = match value_type {
        ValueType::Integer => Value::Integer(
            raw.parse()
                .with_context(|| format!("{name}: `{raw}` is not an integer"))?,
        ),
        ValueType::Float => Value::Float(
            raw.parse()
                .with_context(|| format!("{name}: `{raw}` is not a number"))?,
        ),
        ValueType::Boolean => Value::Boolean(
            raw.parse()
                .with_context(|| format!("{name}: `{raw}` is not true or false"))?,
        ),
        ValueType::Text => Value::from(raw),
    };
    Ok(value)
}

/// Human rendering of a value, redacted when the column is sensitive
pub fn display_value(value: &Value, sensitive: bool) -> String {
    if sensitive && !value.is_null() {
        Sensitive::new(value).to_string()
    } else {
        value.to_string()
    }
}

pub fn json_value(value: &Value, sensitive: bool) -> serde_json::Value {
    if sensitive && !value.is_null() {
        serde_json::Value::String(Sensitive::new(value).to_string())
    } else {
        serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
    }
}
