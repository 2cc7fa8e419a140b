//! Attribute paths and schema-level path patterns.
//!
//! An [`AttributePath`] names one concrete position in a value tree and is
//! the key used by diagnostics and the replacement-path set. A
//! [`PathPattern`] is the schema-level counterpart: it names the position
//! of a schema node and may match many concrete paths through wildcard
//! collection steps.

use serde::{Deserialize, Serialize};

/// One step of a concrete attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStep {
    /// A named attribute of an object.
    Attribute(String),
    /// A positional element of a list or set.
    Index(usize),
    /// A keyed element of a map.
    Key(String),
}

/// A concrete path from the resource root to one attribute position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Creates an empty path pointing at the resource root.
    #[must_use]
    pub const fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Returns a new path extended with a named attribute step.
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::Attribute(name.into()))
    }

    /// Returns a new path extended with a positional element step.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with_step(PathStep::Index(index))
    }

    /// Returns a new path extended with a map key step.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::Key(key.into()))
    }

    /// The steps of this path, root first.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns true if this path points at the resource root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl std::fmt::Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

/// One step of a schema-level path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternStep {
    /// A named attribute of an object.
    Attribute(String),
    /// Any positional element of a list or set.
    AnyIndex,
    /// Any keyed element of a map.
    AnyKey,
}

/// A schema-level path matching every concrete path reachable from one
/// schema node.
///
/// Generic modifiers attached at the schema level receive the pattern on
/// every request so they can tell which schema position they were declared
/// at, independent of the concrete element the request is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPattern {
    steps: Vec<PatternStep>,
}

impl PathPattern {
    /// Creates an empty pattern matching only the resource root.
    #[must_use]
    pub const fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Returns a new pattern extended with a named attribute step.
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with_step(PatternStep::Attribute(name.into()))
    }

    /// Returns a new pattern extended with a wildcard element step.
    #[must_use]
    pub fn any_index(&self) -> Self {
        self.with_step(PatternStep::AnyIndex)
    }

    /// Returns a new pattern extended with a wildcard map-key step.
    #[must_use]
    pub fn any_key(&self) -> Self {
        self.with_step(PatternStep::AnyKey)
    }

    /// The steps of this pattern, root first.
    #[must_use]
    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    /// Returns true if the given concrete path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &AttributePath) -> bool {
        if self.steps.len() != path.steps().len() {
            return false;
        }
        self.steps
            .iter()
            .zip(path.steps())
            .all(|(pattern, step)| match (pattern, step) {
                (PatternStep::Attribute(a), PathStep::Attribute(b)) => a == b,
                (PatternStep::AnyIndex, PathStep::Index(_))
                | (PatternStep::AnyKey, PathStep::Key(_)) => true,
                _ => false,
            })
    }

    fn with_step(&self, step: PatternStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PatternStep::Attribute(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PatternStep::AnyIndex => write!(f, "[*]")?,
                PatternStep::AnyKey => write!(f, "[\"*\"]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = AttributePath::root()
            .attribute("volumes")
            .index(0)
            .attribute("mounts")
            .key("data");
        assert_eq!(path.to_string(), "volumes[0].mounts[\"data\"]");
        assert_eq!(AttributePath::root().to_string(), "<root>");
    }

    #[test]
    fn test_path_equality() {
        let a = AttributePath::root().attribute("name");
        let b = AttributePath::root().attribute("name");
        assert_eq!(a, b);
        assert_ne!(a, a.index(0));
    }

    #[test]
    fn test_pattern_matches_concrete_path() {
        let pattern = PathPattern::root()
            .attribute("volumes")
            .any_index()
            .attribute("size");
        let path = AttributePath::root()
            .attribute("volumes")
            .index(3)
            .attribute("size");
        assert!(pattern.matches(&path));
    }

    #[test]
    fn test_pattern_rejects_mismatches() {
        let pattern = PathPattern::root().attribute("volumes").any_index();
        assert!(!pattern.matches(&AttributePath::root().attribute("volumes")));
        assert!(!pattern.matches(
            &AttributePath::root().attribute("volumes").key("a")
        ));
        assert!(!pattern.matches(&AttributePath::root().attribute("other").index(0)));
    }

    #[test]
    fn test_pattern_display() {
        let pattern = PathPattern::root().attribute("env").any_key();
        assert_eq!(pattern.to_string(), "env[\"*\"]");
    }
}
