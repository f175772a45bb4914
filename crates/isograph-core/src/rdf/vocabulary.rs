//! Vocabulary namespaces and the well-known terms used by the mapper

use serde::{Deserialize, Serialize};

use super::Iri;
use crate::errors::Result;

impl Iri {
    /// For compile-time constants known to be absolute
    pub(crate) fn from_static(value: &'static str) -> Self {
        Iri(value.to_string())
    }
}

/// A namespace from which predicate IRIs are minted
///
/// Terms are joined with `/` unless the base already ends in `/` or `#`,
/// so `http://example.org/vocab` and `http://example.org/vocab/` mint the
/// same `http://example.org/vocab/user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vocabulary {
    base: Iri,
}

impl Vocabulary {
    /// # Errors
    ///
    /// Returns `InvalidIri` if `base` is not an absolute IRI.
    pub fn new(base: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: Iri::parse(base)?,
        })
    }

    pub fn base(&self) -> &Iri {
        &self.base
    }

    /// Mint `<base>/<local>`
    ///
    /// # Errors
    ///
    /// Returns `InvalidIri` if `local` makes the result invalid (e.g. whitespace).
    pub fn term(&self, local: &str) -> Result<Iri> {
        let base = self.base.as_str();
        let local = local.trim_start_matches('/');
        if base.ends_with('/') || base.ends_with('#') {
            Iri::parse(format!("{base}{local}"))
        } else {
            Iri::parse(format!("{base}/{local}"))
        }
    }
}

pub mod xsd {
    use crate::rdf::Iri;

    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub fn integer() -> Iri {
        Iri::from_static("http://www.w3.org/2001/XMLSchema#integer")
    }

    pub fn string() -> Iri {
        Iri::from_static("http://www.w3.org/2001/XMLSchema#string")
    }

    pub fn boolean() -> Iri {
        Iri::from_static("http://www.w3.org/2001/XMLSchema#boolean")
    }

    pub fn double() -> Iri {
        Iri::from_static("http://www.w3.org/2001/XMLSchema#double")
    }
}

pub mod rdf {
    use crate::rdf::Iri;

    pub fn type_() -> Iri {
        Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_joins_with_slash() {
        let vocab = Vocabulary::new("http://example.org/example/vocab").unwrap();
        assert_eq!(
            vocab.term("user_id").unwrap().as_str(),
            "http://example.org/example/vocab/user_id"
        );
    }

    #[test]
    fn test_term_respects_existing_separator() {
        let slash = Vocabulary::new("http://example.org/vocab/").unwrap();
        let hash = Vocabulary::new("http://xmlns.com/foaf/0.1#").unwrap();
        assert_eq!(
            slash.term("/name").unwrap().as_str(),
            "http://example.org/vocab/name"
        );
        assert_eq!(
            hash.term("name").unwrap().as_str(),
            "http://xmlns.com/foaf/0.1#name"
        );
    }

    #[test]
    fn test_constants_are_absolute() {
        assert!(Iri::is_absolute(xsd::integer().as_str()));
        assert!(xsd::integer().as_str().starts_with(xsd::NS));
        assert!(Iri::is_absolute(rdf::type_().as_str()));
    }
}
