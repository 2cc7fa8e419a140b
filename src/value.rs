//! Attribute values for the reconciliation engine.
//!
//! A [`Value`] is one position of a value tree (config, prior state, or
//! plan). The tree is isomorphic in shape to the schema it was validated
//! against; this module only provides the predicates and derived accessors
//! the engine needs, never construction or validation of trees.

use std::collections::BTreeMap;

use crate::schema::AttributeKind;

/// A single value in a config, state, or plan tree.
///
/// `Null` means "declared absent"; `Unknown` means "not yet computable"
/// and only ever appears in plan trees, at computed positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicitly absent.
    Null,
    /// Not yet known; resolved at apply time.
    Unknown,
    /// Boolean scalar.
    Bool(bool),
    /// String scalar.
    String(String),
    /// Arbitrary numeric scalar.
    Number(f64),
    /// 64-bit signed integer scalar.
    Int64(i64),
    /// 64-bit float scalar.
    Float64(f64),
    /// Ordered collection with positional identity.
    List(Vec<Value>),
    /// Unordered collection without element identity.
    Set(Vec<Value>),
    /// String-keyed collection with keyed identity.
    Map(BTreeMap<String, Value>),
    /// Named, schema-declared fields.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this value is an unknown placeholder.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true if this value is neither null nor unknown.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Null | Self::Unknown)
    }

    /// Structural equality with another value.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns true if no unknown placeholder exists anywhere in the subtree.
    #[must_use]
    pub fn is_fully_known(&self) -> bool {
        match self {
            Self::Unknown => false,
            Self::List(items) | Self::Set(items) => items.iter().all(Self::is_fully_known),
            Self::Map(entries) | Self::Object(entries) => {
                entries.values().all(Self::is_fully_known)
            }
            _ => true,
        }
    }

    /// Returns the attribute kind this value conforms to, if it is known.
    ///
    /// `Null` and `Unknown` are untyped markers and return `None`.
    #[must_use]
    pub const fn kind(&self) -> Option<AttributeKind> {
        match self {
            Self::Null | Self::Unknown => None,
            Self::Bool(_) => Some(AttributeKind::Bool),
            Self::String(_) => Some(AttributeKind::String),
            Self::Number(_) => Some(AttributeKind::Number),
            Self::Int64(_) => Some(AttributeKind::Int64),
            Self::Float64(_) => Some(AttributeKind::Float64),
            Self::List(_) => Some(AttributeKind::List),
            Self::Set(_) => Some(AttributeKind::Set),
            Self::Map(_) => Some(AttributeKind::Map),
            Self::Object(_) => Some(AttributeKind::Object),
        }
    }

    /// Returns true if this value is compatible with the given kind.
    ///
    /// Null and unknown markers are compatible with every kind.
    #[must_use]
    pub fn matches_kind(&self, kind: AttributeKind) -> bool {
        self.kind().is_none_or(|k| k == kind)
    }

    /// Derives a named field from this value.
    ///
    /// A null parent yields null children, an unknown parent yields unknown
    /// children, and a missing field of a known object is null.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        match self {
            Self::Unknown => Self::Unknown,
            Self::Object(fields) | Self::Map(fields) => {
                fields.get(name).cloned().unwrap_or(Self::Null)
            }
            _ => Self::Null,
        }
    }

    /// Derives a positional element from this value.
    ///
    /// Same null/unknown derivation rules as [`Value::field`].
    #[must_use]
    pub fn element(&self, index: usize) -> Self {
        match self {
            Self::Unknown => Self::Unknown,
            Self::List(items) | Self::Set(items) => {
                items.get(index).cloned().unwrap_or(Self::Null)
            }
            _ => Self::Null,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Unknown => write!(f, "(known after apply)"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Number(v) | Self::Float64(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::List(items) | Self::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) | Self::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

/// Builds an object value from name/value pairs.
#[must_use]
pub fn object(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::Unknown.is_unknown());
        assert!(Value::from("x").is_known());
        assert!(!Value::Null.is_known());
        assert!(!Value::Unknown.is_known());
    }

    #[test]
    fn test_equal_is_structural() {
        let a = object([("name", Value::from("a")), ("count", Value::from(2_i64))]);
        let b = object([("count", Value::from(2_i64)), ("name", Value::from("a"))]);
        assert!(a.equal(&b));
        assert!(!a.equal(&Value::Null));
    }

    #[test]
    fn test_fully_known_recurses() {
        let with_unknown = Value::List(vec![
            object([("id", Value::Unknown), ("name", Value::from("a"))]),
        ]);
        assert!(!with_unknown.is_fully_known());

        let known = Value::List(vec![object([("name", Value::from("a"))])]);
        assert!(known.is_fully_known());
    }

    #[test]
    fn test_field_derivation() {
        let obj = object([("name", Value::from("a"))]);
        assert_eq!(obj.field("name"), Value::from("a"));
        assert_eq!(obj.field("missing"), Value::Null);
        assert_eq!(Value::Null.field("name"), Value::Null);
        assert_eq!(Value::Unknown.field("name"), Value::Unknown);
    }

    #[test]
    fn test_element_derivation() {
        let list = Value::List(vec![Value::from("a")]);
        assert_eq!(list.element(0), Value::from("a"));
        assert_eq!(list.element(1), Value::Null);
        assert_eq!(Value::Unknown.element(0), Value::Unknown);
    }

    #[test]
    fn test_kind_compatibility() {
        assert!(Value::from("x").matches_kind(AttributeKind::String));
        assert!(!Value::from("x").matches_kind(AttributeKind::Bool));
        assert!(Value::Null.matches_kind(AttributeKind::Bool));
        assert!(Value::Unknown.matches_kind(AttributeKind::List));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Unknown.to_string(), "(known after apply)");
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        let list = Value::List(vec![Value::from(1_i64), Value::from(2_i64)]);
        assert_eq!(list.to_string(), "[1, 2]");
    }
}
