//! Error types for coercion and comparison.
//!
//! Comparison strategies report every failure through [`ComparisonError`].
//! Callers that need to branch on the failure class use
//! [`ComparisonError::kind`] instead of matching on variants, which leaves
//! room for new variants.

use crate::coerce::Dynamic;
use crate::compare::CompareOp;
use crate::compare::printable;
use crate::state::StateError;

// ============================================================================
// CONVERSION ERROR
// ============================================================================

/// A value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// The source type has no conversion to the target type.
    #[error("unhandled type {found} for conversion to {target}")]
    UnhandledType {
        target: &'static str,
        found: String,
    },

    /// A string could not be parsed as the target type.
    #[error("cannot parse {literal:?} as {target}: {reason}")]
    Parse {
        target: &'static str,
        literal: String,
        reason: String,
    },

    /// The value lies outside the target type's range, or is not finite.
    #[error("value {literal} is out of range for {target}")]
    OutOfRange {
        target: &'static str,
        literal: String,
    },

    /// A collection element failed to convert.
    #[error("element at offset {offset} ({literal}): {source}")]
    Element {
        offset: usize,
        literal: String,
        #[source]
        source: Box<ConversionError>,
    },

    /// The attribute value carries no payload to convert.
    #[error("attribute {0}")]
    NotValued(StateError),
}

impl ConversionError {
    pub(crate) fn unhandled(target: &'static str, found: impl Into<String>) -> Self {
        Self::UnhandledType {
            target,
            found: found.into(),
        }
    }

    pub(crate) fn out_of_range(target: &'static str, literal: impl ToString) -> Self {
        Self::OutOfRange {
            target,
            literal: literal.to_string(),
        }
    }

    pub(crate) fn parse(
        target: &'static str,
        literal: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Parse {
            target,
            literal: literal.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn element(offset: usize, literal: impl Into<String>, source: Self) -> Self {
        Self::Element {
            offset,
            literal: literal.into(),
            source: Box::new(source),
        }
    }
}

// ============================================================================
// COMPARISON ERROR
// ============================================================================

/// Failure classes of [`ComparisonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonErrorKind {
    /// No strategy exists for the target type, or the strategy does not
    /// support the operator.
    NoStrategyRegistered,
    /// The attribute value could not be converted for comparison.
    TypeConversionFailed,
    /// The comparison ran and evaluated false.
    ComparisonFailed,
    /// The target has the wrong type for the strategy.
    UnexpectedTargetType,
    /// The attribute value has the wrong type for the strategy.
    UnexpectedActualType,
}

/// Error returned by comparison strategies and the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ComparisonError {
    #[error("no comparison func registered for operation \"{op}\" with target type {target_type}")]
    NoStrategyRegistered {
        op: CompareOp,
        target_type: String,
    },

    #[error("type conversion failed: {0}")]
    TypeConversionFailed(#[from] ConversionError),

    #[error("comparison failed: {actual} {op} {expected} evaluated false")]
    ComparisonFailed {
        actual: String,
        op: CompareOp,
        expected: String,
    },

    #[error("{func}: unexpected target type {found} for operation \"{op}\", expected {expected}")]
    UnexpectedTargetType {
        func: &'static str,
        found: String,
        op: CompareOp,
        expected: &'static str,
        #[source]
        source: Option<ConversionError>,
    },

    #[error("{func}: unexpected attribute type {found} for operation \"{op}\", expected {expected}")]
    UnexpectedActualType {
        func: &'static str,
        found: String,
        op: CompareOp,
        expected: &'static str,
    },
}

impl ComparisonError {
    /// Failure class of this error.
    pub fn kind(&self) -> ComparisonErrorKind {
        match self {
            Self::NoStrategyRegistered { .. } => ComparisonErrorKind::NoStrategyRegistered,
            Self::TypeConversionFailed(_) => ComparisonErrorKind::TypeConversionFailed,
            Self::ComparisonFailed { .. } => ComparisonErrorKind::ComparisonFailed,
            Self::UnexpectedTargetType { .. } => ComparisonErrorKind::UnexpectedTargetType,
            Self::UnexpectedActualType { .. } => ComparisonErrorKind::UnexpectedActualType,
        }
    }

    /// A comparison that ran and evaluated false. Both sides are rendered
    /// with their type names.
    pub fn comparison_failed(
        actual: impl Into<Dynamic>,
        op: CompareOp,
        expected: impl Into<Dynamic>,
    ) -> Self {
        Self::ComparisonFailed {
            actual: printable(&actual.into()),
            op,
            expected: printable(&expected.into()),
        }
    }

    pub fn no_strategy(op: CompareOp, target_type: impl Into<String>) -> Self {
        Self::NoStrategyRegistered {
            op,
            target_type: target_type.into(),
        }
    }

    pub fn unexpected_target(
        func: &'static str,
        target: &Dynamic,
        op: CompareOp,
        expected: &'static str,
        source: Option<ConversionError>,
    ) -> Self {
        Self::UnexpectedTargetType {
            func,
            found: target.type_name().to_owned(),
            op,
            expected,
            source,
        }
    }

    pub fn unexpected_actual(
        func: &'static str,
        found: impl ToString,
        op: CompareOp,
        expected: &'static str,
    ) -> Self {
        Self::UnexpectedActualType {
            func,
            found: found.to_string(),
            op,
            expected,
        }
    }
}
