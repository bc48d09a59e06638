//! Diagnostics reported by validators.
//!
//! All text fields use `Cow<'static, str>` so the fixed summaries used by
//! the built-in validators never allocate.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::path::Path;

// ============================================================================
// DIAGNOSTIC
// ============================================================================

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the operation being validated (default).
    #[default]
    Error,
    /// Reported to the user but does not block.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single validation finding.
///
/// # Examples
///
/// ```rust
/// use attrval_core::{Diagnostic, Path, Severity};
///
/// let diag = Diagnostic::error("Attribute must be valued", "Attribute must have a value configured")
///     .with_path(Path::root("name"));
/// assert_eq!(diag.severity, Severity::Error);
/// assert_eq!(diag.to_string(), "error: name: Attribute must be valued: Attribute must have a value configured");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Attribute the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
    /// Short, stable headline.
    pub summary: Cow<'static, str>,
    /// Longer explanation, usually naming the offending value.
    pub detail: Cow<'static, str>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        severity: Severity,
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            severity,
            path: None,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn error(summary: impl Into<Cow<'static, str>>, detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Error, summary, detail)
    }

    #[must_use]
    pub fn warning(
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Severity::Warning, summary, detail)
    }

    /// Attach the attribute path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(path) = &self.path {
            write!(f, "{path}: ")?;
        }
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Ordered collection of [`Diagnostic`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn add_error(
        &mut self,
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(
        &mut self,
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) {
        self.push(Diagnostic::warning(summary, detail));
    }

    /// Add an error located at `path`.
    pub fn add_attribute_error(
        &mut self,
        path: Path,
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) {
        self.push(Diagnostic::error(summary, detail).with_path(path));
    }

    /// Add a warning located at `path`.
    pub fn add_attribute_warning(
        &mut self,
        path: Path,
        summary: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) {
        self.push(Diagnostic::warning(summary, detail).with_path(path));
    }

    /// Move every diagnostic out of `other`, keeping order.
    pub fn append(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Whether any diagnostic has error severity.
    pub fn has_error(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.items {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
