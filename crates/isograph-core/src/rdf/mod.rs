//! Minimal RDF term model
//!
//! Only what the graph collaborator contract needs: IRIs, typed literals,
//! statements, single-statement patterns and vocabulary namespaces.

pub mod vocabulary;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{IsographError, Result};

pub use vocabulary::{rdf, xsd, Vocabulary};

/// An absolute IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    /// Parse an absolute IRI
    ///
    /// # Errors
    ///
    /// Returns `InvalidIri` when the string has no scheme or contains
    /// whitespace or angle brackets.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if let Some(reason) = invalid_reason(&value) {
            return Err(IsographError::InvalidIri {
                iri: value,
                reason: reason.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `value` would be accepted by [`Iri::parse`]
    pub fn is_absolute(value: &str) -> bool {
        invalid_reason(value).is_none()
    }
}

fn invalid_reason(value: &str) -> Option<&'static str> {
    if value.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return Some("contains whitespace or angle brackets");
    }
    let Some((scheme, rest)) = value.split_once(':') else {
        return Some("missing scheme");
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return Some("invalid scheme");
    }
    if rest.is_empty() {
        return Some("empty after scheme");
    }
    None
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = IsographError;

    fn try_from(value: String) -> Result<Self> {
        Iri::parse(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

/// A literal with an explicit datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Iri,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }

    /// `"<n>"^^xsd:integer` in canonical lexical form
    pub fn integer(value: i64) -> Self {
        Self::new(value.to_string(), xsd::integer())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value, xsd::string())
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(value.to_string(), xsd::boolean())
    }

    pub fn double(value: f64) -> Self {
        Self::new(value.to_string(), xsd::double())
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}^^{}", self.lexical, self.datatype)
    }
}

/// Statement object position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            Term::Iri(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

/// A single triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Statement {
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

/// Triple pattern; `None` positions match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Iri>,
    pub predicate: Option<Iri>,
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: Iri) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_predicate(mut self, predicate: Iri) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn matches(&self, statement: &Statement) -> bool {
        self.subject
            .as_ref()
            .map_or(true, |s| *s == statement.subject)
            && self
                .predicate
                .as_ref()
                .map_or(true, |p| *p == statement.predicate)
            && self.object.as_ref().map_or(true, |o| *o == statement.object)
    }
}
