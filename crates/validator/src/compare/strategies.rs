//! Scalar comparison strategies.

use std::cmp::Ordering;

use attrval_core::{AttrValue, Tristate};

use super::CompareOp;
use crate::coerce::{
    Dynamic, try_coerce_to_bool, try_coerce_to_decimal, try_coerce_to_float64, try_coerce_to_int,
    try_coerce_to_int64,
};
use crate::conv::{attr_value_to_decimal, attr_value_to_f64, attr_value_to_i64, attr_value_to_string};
use crate::error::{ComparisonError, ConversionError};
use crate::state::StateError;

/// Whether the metadata asks for case-insensitive string comparison.
///
/// The first metadata value, when it is a bool, is the flag.
pub(crate) fn case_insensitive(meta: &[Dynamic]) -> bool {
    matches!(meta.first(), Some(Dynamic::Bool(true)))
}

/// Lower-case `s` when `fold` is set.
pub(crate) fn fold_case(s: &str, fold: bool) -> String {
    if fold { s.to_lowercase() } else { s.to_owned() }
}

fn finish<T>(
    holds: Option<bool>,
    actual: T,
    op: CompareOp,
    expected: T,
    target_type: &'static str,
) -> Result<(), ComparisonError>
where
    T: Into<Dynamic>,
{
    match holds {
        Some(true) => Ok(()),
        Some(false) => Err(ComparisonError::comparison_failed(actual, op, expected)),
        None => Err(ComparisonError::no_strategy(op, target_type)),
    }
}

/// Equality of a bool attribute with a bool target.
///
/// Supports `==` and `<>`.
pub fn compare_bool(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    _meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let actual = match av {
        AttrValue::Bool(Tristate::Known(b)) => *b,
        AttrValue::Bool(Tristate::Null) => {
            return Err(ConversionError::NotValued(StateError::ValueIsNull).into());
        }
        AttrValue::Bool(Tristate::Unknown) => {
            return Err(ConversionError::NotValued(StateError::ValueIsUnknown).into());
        }
        other => {
            return Err(ComparisonError::unexpected_actual(
                "compare_bool",
                other.attr_type(),
                op,
                "bool",
            ));
        }
    };
    let expected = try_coerce_to_bool(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_bool", target, op, "bool", Some(e))
    })?;

    let holds = match op {
        CompareOp::Equal | CompareOp::NotEqual => op.evaluate(&actual, &expected),
        _ => None,
    };
    finish(holds, actual, op, expected, "bool")
}

/// Numeric comparison in `f64`.
///
/// IEEE semantics apply: a NaN attribute equals nothing, itself included.
pub fn compare_float64(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    _meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let (actual, _) = attr_value_to_f64(av)?;
    let expected = try_coerce_to_float64(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_float64", target, op, "float64", Some(e))
    })?;
    finish(op.evaluate(&actual, &expected), actual, op, expected, "float64")
}

/// Numeric comparison in `i64`. Fractional attribute values truncate toward
/// zero.
pub fn compare_int64(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    _meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let (actual, _) = attr_value_to_i64(av)?;
    let expected = try_coerce_to_int64(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_int64", target, op, "int64", Some(e))
    })?;
    finish(op.evaluate(&actual, &expected), actual, op, expected, "int64")
}

/// Numeric comparison for the platform "int" family. The target must fit
/// `isize`; the comparison itself runs in `i64`.
pub fn compare_int(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let expected = try_coerce_to_int(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_int", target, op, "int", Some(e))
    })?;
    compare_int64(av, op, &Dynamic::Int64(expected as i64), meta)
}

/// Exact arbitrary-precision comparison.
pub fn compare_decimal(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    _meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let actual = attr_value_to_decimal(av)?;
    let expected = try_coerce_to_decimal(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_decimal", target, op, "decimal", Some(e))
    })?;

    let ordering = actual.cmp(&expected);
    let holds = match op {
        CompareOp::Equal => Some(ordering == Ordering::Equal),
        CompareOp::NotEqual => Some(ordering != Ordering::Equal),
        CompareOp::LessThan => Some(ordering == Ordering::Less),
        CompareOp::LessThanOrEqualTo => Some(ordering != Ordering::Greater),
        CompareOp::GreaterThan => Some(ordering == Ordering::Greater),
        CompareOp::GreaterThanOrEqualTo => Some(ordering != Ordering::Less),
        CompareOp::OneOf | CompareOp::NotOneOf => None,
    };
    finish(holds, actual, op, expected, "decimal")
}

/// String equality against the string form of the attribute.
///
/// Supports `==` and `<>`. A leading `true` metadata value makes the
/// comparison case-insensitive.
pub fn compare_string(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let Some(expected) = target.as_str() else {
        return Err(ComparisonError::unexpected_target(
            "compare_string",
            target,
            op,
            "string",
            None,
        ));
    };
    let fold = case_insensitive(meta);
    let actual = fold_case(&attr_value_to_string(av), fold);
    let expected = fold_case(expected, fold);

    let holds = match op {
        CompareOp::Equal | CompareOp::NotEqual => op.evaluate(&actual, &expected),
        _ => None,
    };
    finish(holds, actual, op, expected, "string")
}
