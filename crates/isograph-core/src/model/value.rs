use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{IsographError, Result};
use crate::rdf::Literal;

/// Declared type of a column or graph property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Integer,
    Text,
    Boolean,
    Float,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Text => "text",
            ValueType::Boolean => "boolean",
            ValueType::Float => "float",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute value shared by both sides of an isomorphism
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Boolean(bool),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Runtime type; `None` for null
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::Float(_) => Some(ValueType::Float),
            Value::Text(_) => Some(ValueType::Text),
        }
    }

    /// Check `self` against a declared type; null always fits
    ///
    /// Integers widen to float; nothing else is coerced.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming `attribute` when the types disagree.
    pub fn conform(self, attribute: &str, expected: ValueType) -> Result<Value> {
        match (self, expected) {
            (Value::Null, _) => Ok(Value::Null),
            (Value::Integer(i), ValueType::Float) => Ok(Value::Float(i as f64)),
            (value, expected) if value.value_type() == Some(expected) => Ok(value),
            (value, expected) => Err(IsographError::InvalidValue {
                attribute: attribute.to_string(),
                expected: expected.to_string(),
                actual: value
                    .value_type()
                    .map_or("null".to_string(), |t| t.to_string()),
            }),
        }
    }

    /// Typed literal for this value; `None` for null
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(Literal::integer(*i)),
            Value::Boolean(b) => Some(Literal::boolean(*b)),
            Value::Float(x) => Some(Literal::double(*x)),
            Value::Text(s) => Some(Literal::string(s.clone())),
        }
    }

    /// Read a literal as `expected`
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the lexical form does not parse as `expected`.
    pub fn from_literal(attribute: &str, literal: &Literal, expected: ValueType) -> Result<Value> {
        let lexical = literal.lexical();
        let invalid = || IsographError::InvalidValue {
            attribute: attribute.to_string(),
            expected: expected.to_string(),
            actual: format!("{}", literal),
        };
        match expected {
            ValueType::Integer => lexical.parse().map(Value::Integer).map_err(|_| invalid()),
            ValueType::Float => lexical.parse().map(Value::Float).map_err(|_| invalid()),
            ValueType::Boolean => match lexical {
                "true" | "1" => Ok(Value::Boolean(true)),
                "false" | "0" => Ok(Value::Boolean(false)),
                _ => Err(invalid()),
            },
            // Any datatype's lexical form reads as text
            ValueType::Text => Ok(Value::Text(lexical.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conform_accepts_null_and_matching() {
        assert_eq!(
            Value::Null.conform("user_id", ValueType::Integer).unwrap(),
            Value::Null
        );
        assert_eq!(
            Value::from(4).conform("user_id", ValueType::Integer).unwrap(),
            Value::Integer(4)
        );
    }

    #[test]
    fn test_conform_rejects_wrong_type() {
        let err = Value::from("four")
            .conform("user_id", ValueType::Integer)
            .unwrap_err();
        assert_eq!(
            err,
            IsographError::InvalidValue {
                attribute: "user_id".into(),
                expected: "integer".into(),
                actual: "text".into(),
            }
        );
    }

    #[test]
    fn test_conform_widens_integer_to_float() {
        assert_eq!(
            Value::from(2).conform("score", ValueType::Float).unwrap(),
            Value::Float(2.0)
        );
    }

    #[test]
    fn test_literal_round_trip_per_type() {
        for (value, ty) in [
            (Value::from(42), ValueType::Integer),
            (Value::from(true), ValueType::Boolean),
            (Value::from(1.5), ValueType::Float),
            (Value::from("Bob"), ValueType::Text),
        ] {
            let lit = value.to_literal().unwrap();
            assert_eq!(Value::from_literal("a", &lit, ty).unwrap(), value);
        }
        assert!(Value::Null.to_literal().is_none());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7)), Value::Integer(7));
    }
}
