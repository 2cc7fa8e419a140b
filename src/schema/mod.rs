//! Resource schemas.
//!
//! A [`Schema`] is the immutable attribute tree a resource type registers
//! once at startup. Every node declares its kind, behavior flags, and the
//! modifier chain the engine runs at that position. Schemas are only read
//! during reconciliation; value trees are validated against them elsewhere.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::modifier::{ModifierChain, PlanModifier};
use crate::path::PathPattern;

/// The closed set of attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Boolean scalar.
    Bool,
    /// String scalar.
    String,
    /// Arbitrary numeric scalar.
    Number,
    /// 64-bit signed integer scalar.
    Int64,
    /// 64-bit float scalar.
    Float64,
    /// Ordered collection.
    List,
    /// Unordered collection.
    Set,
    /// String-keyed collection.
    Map,
    /// Named nested attributes.
    Object,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Number => "number",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Object => "object",
        };
        write!(f, "{s}")
    }
}

/// An attribute's kind together with its kind-specific payload: the
/// modifier chain typed to that kind, and the child schema for containers.
pub enum AttributeType {
    /// Boolean scalar.
    Bool(ModifierChain),
    /// String scalar.
    String(ModifierChain),
    /// Arbitrary numeric scalar.
    Number(ModifierChain),
    /// 64-bit signed integer scalar.
    Int64(ModifierChain),
    /// 64-bit float scalar.
    Float64(ModifierChain),
    /// Ordered collection of one element type.
    List {
        /// Whole-collection modifier chain.
        modifiers: ModifierChain,
        /// Schema every element conforms to.
        element: Box<AttributeNode>,
    },
    /// Unordered collection of one element type.
    Set {
        /// Whole-collection modifier chain.
        modifiers: ModifierChain,
        /// Schema every element conforms to.
        element: Box<AttributeNode>,
    },
    /// String-keyed collection of one element type.
    Map {
        /// Whole-collection modifier chain.
        modifiers: ModifierChain,
        /// Schema every element conforms to.
        element: Box<AttributeNode>,
    },
    /// Nested object with named, declared children.
    Object {
        /// Whole-object modifier chain.
        modifiers: ModifierChain,
        /// Declared child attributes by name.
        attributes: BTreeMap<String, AttributeNode>,
    },
}

impl AttributeType {
    /// A bool scalar with an empty modifier chain.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Bool(Vec::new())
    }

    /// A string scalar with an empty modifier chain.
    #[must_use]
    pub const fn string() -> Self {
        Self::String(Vec::new())
    }

    /// A number scalar with an empty modifier chain.
    #[must_use]
    pub const fn number() -> Self {
        Self::Number(Vec::new())
    }

    /// An int64 scalar with an empty modifier chain.
    #[must_use]
    pub const fn int64() -> Self {
        Self::Int64(Vec::new())
    }

    /// A float64 scalar with an empty modifier chain.
    #[must_use]
    pub const fn float64() -> Self {
        Self::Float64(Vec::new())
    }

    /// A list of the given element schema.
    #[must_use]
    pub fn list_of(element: AttributeNode) -> Self {
        Self::List {
            modifiers: Vec::new(),
            element: Box::new(element),
        }
    }

    /// A set of the given element schema.
    #[must_use]
    pub fn set_of(element: AttributeNode) -> Self {
        Self::Set {
            modifiers: Vec::new(),
            element: Box::new(element),
        }
    }

    /// A map of the given element schema.
    #[must_use]
    pub fn map_of(element: AttributeNode) -> Self {
        Self::Map {
            modifiers: Vec::new(),
            element: Box::new(element),
        }
    }

    /// An object with the given named children.
    #[must_use]
    pub fn object(attributes: impl IntoIterator<Item = (&'static str, AttributeNode)>) -> Self {
        Self::Object {
            modifiers: Vec::new(),
            attributes: attributes
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        }
    }

    /// Appends a modifier to this attribute's chain.
    ///
    /// Chain order is declaration order and is user-observable.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Arc<dyn PlanModifier>) -> Self {
        self.modifiers_mut().push(modifier);
        self
    }

    /// The kind this type declares.
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Bool(_) => AttributeKind::Bool,
            Self::String(_) => AttributeKind::String,
            Self::Number(_) => AttributeKind::Number,
            Self::Int64(_) => AttributeKind::Int64,
            Self::Float64(_) => AttributeKind::Float64,
            Self::List { .. } => AttributeKind::List,
            Self::Set { .. } => AttributeKind::Set,
            Self::Map { .. } => AttributeKind::Map,
            Self::Object { .. } => AttributeKind::Object,
        }
    }

    /// This attribute's own modifier chain.
    #[must_use]
    pub const fn modifiers(&self) -> &ModifierChain {
        match self {
            Self::Bool(modifiers)
            | Self::String(modifiers)
            | Self::Number(modifiers)
            | Self::Int64(modifiers)
            | Self::Float64(modifiers)
            | Self::List { modifiers, .. }
            | Self::Set { modifiers, .. }
            | Self::Map { modifiers, .. }
            | Self::Object { modifiers, .. } => modifiers,
        }
    }

    fn modifiers_mut(&mut self) -> &mut ModifierChain {
        match self {
            Self::Bool(modifiers)
            | Self::String(modifiers)
            | Self::Number(modifiers)
            | Self::Int64(modifiers)
            | Self::Float64(modifiers)
            | Self::List { modifiers, .. }
            | Self::Set { modifiers, .. }
            | Self::Map { modifiers, .. }
            | Self::Object { modifiers, .. } => modifiers,
        }
    }
}

impl std::fmt::Debug for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} modifiers)", self.kind(), self.modifiers().len())
    }
}

/// One node of the schema tree: behavior flags plus typed payload.
#[derive(Debug)]
pub struct AttributeNode {
    /// The operator must supply a config value.
    pub required: bool,
    /// The operator may supply a config value.
    pub optional: bool,
    /// The provider computes the value; may be absent from config.
    pub computed: bool,
    /// Kind, modifier chain, and child schema.
    pub attr_type: AttributeType,
}

impl AttributeNode {
    /// Creates a required attribute.
    #[must_use]
    pub const fn required(attr_type: AttributeType) -> Self {
        Self {
            required: true,
            optional: false,
            computed: false,
            attr_type,
        }
    }

    /// Creates an optional attribute.
    #[must_use]
    pub const fn optional(attr_type: AttributeType) -> Self {
        Self {
            required: false,
            optional: true,
            computed: false,
            attr_type,
        }
    }

    /// Creates a computed-only attribute.
    #[must_use]
    pub const fn computed(attr_type: AttributeType) -> Self {
        Self {
            required: false,
            optional: false,
            computed: true,
            attr_type,
        }
    }

    /// Marks an optional attribute as additionally computed.
    #[must_use]
    pub const fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    fn validate(&self, pattern: &PathPattern) -> Result<(), SchemaError> {
        if !self.required && !self.optional && !self.computed {
            return Err(SchemaError::MissingFlags {
                path: pattern.to_string(),
            });
        }
        if self.required && self.optional {
            return Err(SchemaError::conflicting(
                pattern.to_string(),
                "required and optional are mutually exclusive",
            ));
        }
        if self.required && self.computed {
            return Err(SchemaError::conflicting(
                pattern.to_string(),
                "a required attribute cannot be computed",
            ));
        }

        match &self.attr_type {
            AttributeType::List { element, .. } | AttributeType::Set { element, .. } => {
                element.validate(&pattern.any_index())?;
            }
            AttributeType::Map { element, .. } => {
                element.validate(&pattern.any_key())?;
            }
            AttributeType::Object { attributes, .. } => {
                for (name, child) in attributes {
                    child.validate(&pattern.attribute(name))?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// The immutable schema of one resource type.
#[derive(Debug, Default)]
pub struct Schema {
    attributes: BTreeMap<String, AttributeNode>,
}

impl Schema {
    /// Creates a schema from named top-level attributes.
    #[must_use]
    pub fn new(attributes: impl IntoIterator<Item = (&'static str, AttributeNode)>) -> Self {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        }
    }

    /// Validates behavior flags across the whole tree.
    ///
    /// Called once at resource-type registration.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, with the offending
    /// schema-level path.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (name, node) in &self.attributes {
            node.validate(&PathPattern::root().attribute(name))?;
        }
        Ok(())
    }

    /// The declared top-level attributes, in name order.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeNode> {
        &self.attributes
    }
}
