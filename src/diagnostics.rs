//! Diagnostics emitted during plan reconciliation.
//!
//! Diagnostics accumulate across the whole pass and never abort it: the
//! recursion always completes so the caller can present every problem from
//! one planning cycle at once.

use serde::{Deserialize, Serialize};

use crate::path::AttributePath;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal; the plan proceeds.
    Warning,
    /// Fatal to this plan; the caller aborts after the pass completes.
    Error,
}

/// A single operator-facing diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the problem.
    pub severity: Severity,
    /// One-line description.
    pub summary: String,
    /// Longer explanation, may be empty.
    pub detail: String,
    /// Attribute position the diagnostic refers to, if any.
    pub path: Option<AttributePath>,
}

impl Diagnostic {
    /// Creates an error diagnostic without an attribute position.
    #[must_use]
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Creates a warning diagnostic without an attribute position.
    #[must_use]
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Creates an error diagnostic at an attribute position.
    #[must_use]
    pub fn error_at(
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            path: Some(path),
            ..Self::error(summary, detail)
        }
    }

    /// Creates a warning diagnostic at an attribute position.
    #[must_use]
    pub fn warning_at(
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            path: Some(path),
            ..Self::warning(summary, detail)
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.path {
            Some(path) => write!(f, "{severity}: {} (at {path})", self.summary)?,
            None => write!(f, "{severity}: {}", self.summary)?,
        }
        if !self.detail.is_empty() {
            write!(f, " - {}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered, deduplicating accumulator of diagnostics.
///
/// Appending a diagnostic that is structurally equal to one already held is
/// a no-op, so repeated emission from re-visited code paths is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a diagnostic, ignoring exact duplicates.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.entries.contains(&diagnostic) {
            self.entries.push(diagnostic);
        }
    }

    /// Appends every diagnostic from another accumulator, deduplicating.
    pub fn extend(&mut self, other: Self) {
        for diagnostic in other.entries {
            self.push(diagnostic);
        }
    }

    /// Returns true if any error-severity diagnostic is present.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of error-severity diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity diagnostics.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Total number of accumulated diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no diagnostic has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the accumulated diagnostics in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_warning() -> Diagnostic {
        Diagnostic::warning_at(
            AttributePath::root().attribute("name"),
            "Ambiguous match",
            "details",
        )
    }

    #[test]
    fn test_push_deduplicates() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(sample_warning());
        diagnostics.push(sample_warning());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_differing_detail_is_not_a_duplicate() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(sample_warning());
        diagnostics.push(Diagnostic::warning_at(
            AttributePath::root().attribute("name"),
            "Ambiguous match",
            "other details",
        ));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_has_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(sample_warning());
        assert!(!diagnostics.has_errors());
        diagnostics.push(Diagnostic::error("Bad value", ""));
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_extend_preserves_order_and_dedups() {
        let mut first = Diagnostics::new();
        first.push(Diagnostic::warning("a", ""));
        let mut second = Diagnostics::new();
        second.push(Diagnostic::warning("a", ""));
        second.push(Diagnostic::warning("b", ""));
        first.extend(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.iter().next().map(|d| d.summary.as_str()), Some("a"));
    }

    #[test]
    fn test_display_includes_path() {
        let rendered = sample_warning().to_string();
        assert!(rendered.contains("warning"));
        assert!(rendered.contains("at name"));
    }
}
