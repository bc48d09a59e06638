//! Pluggable comparison of attribute values against targets.
//!
//! A comparison strategy is a [`ComparisonFn`]. The [`ComparisonRegistry`]
//! maps the type of the *target* to the strategy that handles it, so callers
//! can add strategies for their own target types or override the defaults.
//!
//! # Examples
//!
//! ```rust
//! use attrval_core::AttrValue;
//! use attrval_validator::compare::{CompareOp, ComparisonRegistry};
//! use attrval_validator::coerce::Dynamic;
//!
//! let registry = ComparisonRegistry::new();
//! let target = Dynamic::from(5_i64);
//!
//! assert!(registry
//!     .compare_attr_values(&AttrValue::int64_value(7), CompareOp::GreaterThan, &target, &[])
//!     .is_ok());
//! ```

mod collections;
mod printable;
mod registry;
mod strategies;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use attrval_core::AttrValue;
use serde::{Deserialize, Serialize};

use crate::coerce::Dynamic;
use crate::error::ComparisonError;

pub use collections::{compare_ints, compare_strings};
pub use printable::printable;
pub use registry::ComparisonRegistry;
pub use strategies::{
    compare_bool, compare_decimal, compare_float64, compare_int, compare_int64, compare_string,
};

/// A comparison strategy.
///
/// Receives the attribute value, the operator, the target and optional
/// metadata. Returns `Ok(())` when the comparison holds.
pub type ComparisonFn = Arc<
    dyn Fn(&AttrValue, CompareOp, &Dynamic, &[Dynamic]) -> Result<(), ComparisonError>
        + Send
        + Sync,
>;

// ============================================================================
// COMPARE OP
// ============================================================================

/// Comparison operator.
///
/// Serialized by name (`"less_than"`); symbols (`"<"`) are accepted when
/// deserializing and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    #[serde(alias = "==")]
    Equal,
    #[serde(alias = "<>")]
    NotEqual,
    #[serde(alias = "<")]
    LessThan,
    #[serde(alias = "<=")]
    LessThanOrEqualTo,
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = ">=")]
    GreaterThanOrEqualTo,
    #[serde(alias = "|")]
    OneOf,
    #[serde(alias = "^|")]
    NotOneOf,
}

impl CompareOp {
    pub const ALL: [Self; 8] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqualTo,
        Self::GreaterThan,
        Self::GreaterThanOrEqualTo,
        Self::OneOf,
        Self::NotOneOf,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::OneOf => "|",
            Self::NotOneOf => "^|",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqualTo => "less_than_or_equal_to",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqualTo => "greater_than_or_equal_to",
            Self::OneOf => "one_of",
            Self::NotOneOf => "not_one_of",
        }
    }

    /// `<`, `<=`, `>` and `>=`.
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::LessThan
                | Self::LessThanOrEqualTo
                | Self::GreaterThan
                | Self::GreaterThanOrEqualTo
        )
    }

    /// `|` and `^|`.
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::OneOf | Self::NotOneOf)
    }

    /// Evaluate an ordering or equality operator. `None` for membership
    /// operators.
    pub(crate) fn evaluate<T: PartialOrd>(self, actual: &T, expected: &T) -> Option<bool> {
        match self {
            Self::Equal => Some(actual == expected),
            Self::NotEqual => Some(actual != expected),
            Self::LessThan => Some(actual < expected),
            Self::LessThanOrEqualTo => Some(actual <= expected),
            Self::GreaterThan => Some(actual > expected),
            Self::GreaterThanOrEqualTo => Some(actual >= expected),
            Self::OneOf | Self::NotOneOf => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error from parsing a [`CompareOp`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator {0:?}")]
pub struct ParseCompareOpError(pub String);

impl FromStr for CompareOp {
    type Err = ParseCompareOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s || op.name() == s)
            .ok_or_else(|| ParseCompareOpError(s.to_owned()))
    }
}
