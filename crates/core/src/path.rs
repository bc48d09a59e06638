//! Attribute paths.
//!
//! A [`Path`] addresses one value inside a configuration snapshot as a
//! sequence of steps: attribute names, map keys and list/set indices. A
//! [`PathExpression`] is the pattern form used to describe where a validator
//! is attached; it may contain wildcards.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Named object attribute, displayed as `name`.
    AttributeName(String),
    /// Map key, displayed as `["key"]`.
    ElementKeyString(String),
    /// List or set index, displayed as `[3]`.
    ElementKeyInt(i64),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeName(name) => f.write_str(name),
            Self::ElementKeyString(key) => write!(f, "[{key:?}]"),
            Self::ElementKeyInt(index) => write!(f, "[{index}]"),
        }
    }
}

/// Location of an attribute value inside a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Empty path addressing the configuration root.
    #[must_use]
    pub const fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Path to a top-level attribute.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            steps: vec![PathStep::AttributeName(name.into())],
        }
    }

    /// Child path stepping into the named attribute.
    #[must_use]
    pub fn at_name(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::AttributeName(name.into()))
    }

    /// Child path stepping into a map entry.
    #[must_use]
    pub fn at_map_key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKeyString(key.into()))
    }

    /// Child path stepping into a list or set element.
    #[must_use]
    pub fn at_list_index(&self, index: i64) -> Self {
        self.with_step(PathStep::ElementKeyInt(index))
    }

    /// Path with the last step removed. The parent of a top-level attribute
    /// is the empty path.
    #[must_use]
    pub fn parent_path(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.pop();
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Expression matching exactly this path.
    #[must_use]
    pub fn expression(&self) -> PathExpression {
        PathExpression {
            steps: self
                .steps
                .iter()
                .cloned()
                .map(ExpressionStep::Exact)
                .collect(),
        }
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Render a list of paths as `["a.b", "c"]`.
pub fn format_paths(paths: &[Path]) -> String {
    let rendered: Vec<String> = paths.iter().map(|p| format!("{:?}", p.to_string())).collect();
    format!("[{}]", rendered.join(", "))
}

// ============================================================================
// PATH EXPRESSION
// ============================================================================

/// One step of a [`PathExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionStep {
    /// Matches exactly this step.
    Exact(PathStep),
    /// Matches any map key or list/set index, displayed as `[*]`.
    AnyElement,
}

/// Pattern over [`Path`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathExpression {
    steps: Vec<ExpressionStep>,
}

impl PathExpression {
    /// Expression extended with a wildcard element step.
    #[must_use]
    pub fn at_any_element(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.push(ExpressionStep::AnyElement);
        Self { steps }
    }

    /// Expression extended with an exact attribute name step.
    #[must_use]
    pub fn at_name(&self, name: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(ExpressionStep::Exact(PathStep::AttributeName(name.into())));
        Self { steps }
    }

    pub fn steps(&self) -> &[ExpressionStep] {
        &self.steps
    }

    /// Whether `path` is matched by this expression.
    pub fn matches(&self, path: &Path) -> bool {
        self.steps.len() == path.steps.len()
            && self
                .steps
                .iter()
                .zip(&path.steps)
                .all(|(expr, step)| match expr {
                    ExpressionStep::Exact(exact) => exact == step,
                    ExpressionStep::AnyElement => !matches!(step, PathStep::AttributeName(_)),
                })
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match step {
                ExpressionStep::Exact(step) => write!(f, "{step}")?,
                ExpressionStep::AnyElement => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}
