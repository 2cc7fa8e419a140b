//! Replacement-forcing attribute paths.
//!
//! An attribute path lands here when some modifier decided the planned
//! change can only be realized by destroying and recreating the resource.
//! The caller turns a non-empty set into a destroy-then-create decision.

use serde::{Deserialize, Serialize};

use crate::path::AttributePath;

/// Ordered, deduplicating set of paths that force full resource replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacePaths {
    paths: Vec<AttributePath>,
}

impl ReplacePaths {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Adds a path; re-adding an existing path is a no-op.
    pub fn add(&mut self, path: AttributePath) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Removes a path if present.
    pub fn remove(&mut self, path: &AttributePath) {
        self.paths.retain(|p| p != path);
    }

    /// Returns true if the given path is marked.
    #[must_use]
    pub fn contains(&self, path: &AttributePath) -> bool {
        self.paths.contains(path)
    }

    /// Number of marked paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over the marked paths in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, AttributePath> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a ReplacePaths {
    type Item = &'a AttributePath;
    type IntoIter = std::slice::Iter<'a, AttributePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl std::fmt::Display for ReplacePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates() {
        let mut paths = ReplacePaths::new();
        paths.add(AttributePath::root().attribute("image"));
        paths.add(AttributePath::root().attribute("image"));
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut paths = ReplacePaths::new();
        let image = AttributePath::root().attribute("image");
        paths.add(image.clone());
        paths.add(AttributePath::root().attribute("region"));
        paths.remove(&image);
        assert!(!paths.contains(&image));
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut paths = ReplacePaths::new();
        paths.add(AttributePath::root().attribute("b"));
        paths.add(AttributePath::root().attribute("a"));
        let rendered = paths.to_string();
        assert_eq!(rendered, "b, a");
    }
}
