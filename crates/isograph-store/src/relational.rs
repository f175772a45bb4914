//! Relational store over ordinary SQLite tables
//!
//! One table per relational class, with an integer `AUTOINCREMENT` primary
//! key. `created_at` / `updated_at` text columns, when declared, are
//! maintained here as RFC 3339 UTC timestamps.

use isograph_core::{
    Attributes, Column, IsographError, Record, RelationalClass, RelationalStore, Result, Value,
    ValueType,
};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};

use crate::errors::from_rusqlite;

pub struct SqliteRelationalStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRelationalStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create the class's table if it does not exist
    ///
    /// # Errors
    ///
    /// `Persistence` if SQLite rejects the DDL.
    pub fn create_table(&self, class: &RelationalClass) -> Result<()> {
        let columns: Vec<String> = std::iter::once(format!(
            "{} INTEGER PRIMARY KEY AUTOINCREMENT",
            quote(class.primary_key())
        ))
        .chain(
            class
                .columns()
                .iter()
                .map(|c| format!("{} {}", quote(&c.name), sql_type(c.value_type))),
        )
        .collect();
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(class.table()),
            columns.join(", ")
        );
        self.conn.execute(&ddl, []).map_err(from_rusqlite)?;
        tracing::debug!(table = class.table(), "ensured table");
        Ok(())
    }

    /// Describe an existing table as a relational class named `name`
    ///
    /// Declared types map by SQLite affinity rules; columns whose names
    /// mention a password, secret or token are marked sensitive.
    ///
    /// # Errors
    ///
    /// `Persistence` if the table does not exist.
    pub fn reflect(&self, name: &str, table: &str) -> Result<RelationalClass> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([table], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        if rows.is_empty() {
            return Err(IsographError::Persistence {
                op: "reflect".to_string(),
                message: format!("no such table: {table}"),
            });
        }

        let mut class = RelationalClass::new(name, table);
        for (column, declared, pk) in rows {
            if pk > 0 {
                class = class.with_primary_key(column);
                continue;
            }
            let mut spec = Column::new(column, affinity(&declared));
            let lower = spec.name.to_ascii_lowercase();
            if ["password", "secret", "token"].iter().any(|w| lower.contains(w)) {
                spec = spec.sensitive();
            }
            class = class.with_column(spec);
        }
        Ok(class)
    }

    fn read_row(class: &RelationalClass, row: &rusqlite::Row<'_>) -> rusqlite::Result<Attributes> {
        let mut attributes = Attributes::new();
        for (i, column) in class.columns().iter().enumerate() {
            let value = from_sql(row.get_ref(i + 1)?, column.value_type);
            attributes.insert(column.name.clone(), value);
        }
        Ok(attributes)
    }

    fn not_found(class: &RelationalClass, id: i64) -> IsographError {
        IsographError::RecordNotFound {
            model: class.name().to_string(),
            id,
        }
    }
}

impl RelationalStore for SqliteRelationalStore<'_> {
    fn find(&self, class: &RelationalClass, id: i64) -> Result<Record> {
        let columns: Vec<String> = class.attribute_names().iter().map(|c| quote(c)).collect();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            columns.join(", "),
            quote(class.table()),
            quote(class.primary_key())
        );
        let attributes = self
            .conn
            .query_row(&sql, [id], |row| Self::read_row(class, row))
            .optional()
            .map_err(from_rusqlite)?
            .ok_or_else(|| Self::not_found(class, id))?;
        Ok(Record::new(class.name(), Some(id), attributes))
    }

    fn create(&self, class: &RelationalClass, attributes: Attributes) -> Result<Record> {
        let mut attributes = class.conform(attributes)?;
        class.stamp_created(&mut attributes);

        let sql = if attributes.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", quote(class.table()))
        } else {
            let names: Vec<String> = attributes.keys().map(|k| quote(k)).collect();
            let slots: Vec<String> = (1..=attributes.len()).map(|i| format!("?{i}")).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote(class.table()),
                names.join(", "),
                slots.join(", ")
            )
        };
        self.conn
            .execute(&sql, params_from_iter(attributes.values().map(to_sql)))
            .map_err(from_rusqlite)?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(model = class.name(), record_id = id, "inserted row");

        // Re-read so column defaults are reflected
        self.find(class, id)
    }

    fn update(&self, class: &RelationalClass, record: &Record) -> Result<()> {
        let id = record.id().ok_or_else(|| IsographError::InvalidValue {
            attribute: class.primary_key().to_string(),
            expected: "saved record".to_string(),
            actual: "null".to_string(),
        })?;
        let mut attributes = class.conform(record.attributes().clone())?;
        class.stamp_updated(&mut attributes);

        let changed = if attributes.is_empty() {
            let sql = format!(
                "SELECT 1 FROM {} WHERE {} = ?1",
                quote(class.table()),
                quote(class.primary_key())
            );
            self.conn
                .query_row(&sql, [id], |_| Ok(()))
                .optional()
                .map_err(from_rusqlite)?
                .map_or(0, |_| 1)
        } else {
            let sets: Vec<String> = attributes
                .keys()
                .enumerate()
                .map(|(i, k)| format!("{} = ?{}", quote(k), i + 1))
                .collect();
            let sql = format!(
                "UPDATE {} SET {} WHERE {} = ?{}",
                quote(class.table()),
                sets.join(", "),
                quote(class.primary_key()),
                attributes.len() + 1
            );
            let params = attributes
                .values()
                .map(to_sql)
                .chain(std::iter::once(SqlValue::Integer(id)));
            self.conn
                .execute(&sql, params_from_iter(params))
                .map_err(from_rusqlite)?
        };

        if changed == 0 {
            return Err(Self::not_found(class, id));
        }
        Ok(())
    }

    fn delete(&self, class: &RelationalClass, id: i64) -> Result<()> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            quote(class.table()),
            quote(class.primary_key())
        );
        let deleted = self.conn.execute(&sql, [id]).map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(Self::not_found(class, id));
        }
        tracing::debug!(model = class.name(), record_id = id, "deleted row");
        Ok(())
    }
}

pub(crate) fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn sql_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Integer => "INTEGER",
        ValueType::Text => "TEXT",
        ValueType::Boolean => "BOOLEAN",
        ValueType::Float => "REAL",
    }
}

/// SQLite column affinity of a declared type
fn affinity(declared: &str) -> ValueType {
    let upper = declared.to_ascii_uppercase();
    if upper.contains("BOOL") {
        ValueType::Boolean
    } else if upper.contains("INT") {
        ValueType::Integer
    } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
        ValueType::Float
    } else {
        ValueType::Text
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Boolean(b) => SqlValue::Integer(i64::from(*b)),
        Value::Float(x) => SqlValue::Real(*x),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

fn from_sql(value: ValueRef<'_>, expected: ValueType) -> Value {
    match (value, expected) {
        (ValueRef::Null, _) => Value::Null,
        (ValueRef::Integer(i), ValueType::Boolean) => Value::Boolean(i != 0),
        (ValueRef::Integer(i), ValueType::Float) => Value::Float(i as f64),
        (ValueRef::Integer(i), ValueType::Text) => Value::Text(i.to_string()),
        (ValueRef::Integer(i), ValueType::Integer) => Value::Integer(i),
        (ValueRef::Real(x), ValueType::Integer) => Value::Integer(x as i64),
        (ValueRef::Real(x), ValueType::Text) => Value::Text(x.to_string()),
        (ValueRef::Real(x), ValueType::Boolean) => Value::Boolean(x != 0.0),
        (ValueRef::Real(x), ValueType::Float) => Value::Float(x),
        (ValueRef::Text(t) | ValueRef::Blob(t), expected) => {
            let text = String::from_utf8_lossy(t).into_owned();
            match expected {
                ValueType::Integer => text.parse().map_or(Value::Text(text), Value::Integer),
                ValueType::Float => text.parse().map_or(Value::Text(text), Value::Float),
                ValueType::Boolean => Value::Boolean(matches!(text.as_str(), "1" | "true" | "t")),
                ValueType::Text => Value::Text(text),
            }
        }
    }
}
