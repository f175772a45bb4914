//! Triple store over the `statements` table
//!
//! Objects are stored as `(object_kind, object_value, object_datatype)`:
//! IRIs with an empty datatype, literals with their datatype IRI.

use isograph_core::{GraphStore, Iri, IsographError, Literal, Result, Statement, Term, TriplePattern};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};

use crate::errors::from_rusqlite;

const KIND_IRI: &str = "iri";
const KIND_LITERAL: &str = "literal";

pub struct SqliteGraphStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteGraphStore<'c> {
    /// The `statements` table must exist (see `migrations::apply_migrations`)
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Total statement count
    ///
    /// # Errors
    ///
    /// `Persistence` on SQLite failure.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM statements", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        statement_count(count)
    }

    /// # Errors
    ///
    /// `Persistence` on SQLite failure.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn statement_count(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| IsographError::Persistence {
        op: "graph_len".to_string(),
        message: format!("negative statement count {count}"),
    })
}

/// `WHERE` clause and parameters for a pattern
fn where_clause(pattern: &TriplePattern) -> (String, Vec<SqlValue>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();
    let mut push = |column: &str, value: String, conditions: &mut Vec<String>| {
        params.push(SqlValue::Text(value));
        conditions.push(format!("{column} = ?{}", params.len()));
    };

    if let Some(subject) = &pattern.subject {
        push("subject", subject.as_str().to_string(), &mut conditions);
    }
    if let Some(predicate) = &pattern.predicate {
        push("predicate", predicate.as_str().to_string(), &mut conditions);
    }
    if let Some(object) = &pattern.object {
        let (kind, value, datatype) = object_columns(object);
        push("object_kind", kind.to_string(), &mut conditions);
        push("object_value", value, &mut conditions);
        push("object_datatype", datatype, &mut conditions);
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), params)
    }
}

fn object_columns(object: &Term) -> (&'static str, String, String) {
    match object {
        Term::Iri(iri) => (KIND_IRI, iri.as_str().to_string(), String::new()),
        Term::Literal(literal) => (
            KIND_LITERAL,
            literal.lexical().to_string(),
            literal.datatype().as_str().to_string(),
        ),
    }
}

fn decode(
    subject: String,
    predicate: String,
    kind: String,
    value: String,
    datatype: String,
) -> Result<Statement> {
    let object = match kind.as_str() {
        KIND_IRI => Term::Iri(Iri::parse(value)?),
        KIND_LITERAL => Term::Literal(Literal::new(value, Iri::parse(datatype)?)),
        other => {
            return Err(IsographError::Persistence {
                op: "graph_query".to_string(),
                message: format!("unknown object kind {other}"),
            })
        }
    };
    Ok(Statement::new(Iri::parse(subject)?, Iri::parse(predicate)?, object))
}

impl GraphStore for SqliteGraphStore<'_> {
    fn query(&self, pattern: &TriplePattern) -> Result<Vec<Statement>> {
        let (clause, params) = where_clause(pattern);
        let sql = format!(
            "SELECT subject, predicate, object_kind, object_value, object_datatype \
             FROM statements{clause} ORDER BY subject, predicate, id"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter()
            .map(|(s, p, k, v, d)| decode(s, p, k, v, d))
            .collect()
    }

    fn insert(&self, statement: &Statement) -> Result<()> {
        let (kind, value, datatype) = object_columns(&statement.object);
        self.conn
            .execute(
                "INSERT OR IGNORE INTO statements
                    (subject, predicate, object_kind, object_value, object_datatype)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    statement.subject.as_str(),
                    statement.predicate.as_str(),
                    kind,
                    value,
                    datatype
                ],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }

    fn remove(&self, pattern: &TriplePattern) -> Result<usize> {
        let (clause, params) = where_clause(pattern);
        let removed = self
            .conn
            .execute(
                &format!("DELETE FROM statements{clause}"),
                params_from_iter(params),
            )
            .map_err(from_rusqlite)?;
        tracing::debug!(removed, "removed statements");
        Ok(removed)
    }
}
