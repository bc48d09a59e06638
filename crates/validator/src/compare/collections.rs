//! Strategies whose target is a list.
//!
//! A scalar attribute is tested for membership in the target list (`|`,
//! `^|`). A list or set attribute is compared to the target element by
//! element (`==`, `<>`). Collection-to-collection membership is not
//! supported.

use attrval_core::{AttrType, AttrValue};

use super::CompareOp;
use super::strategies::{case_insensitive, fold_case};
use crate::coerce::{Dynamic, try_coerce_to_ints};
use crate::conv::{attr_value_to_i64, attr_value_to_string, collection_element_type, int_elements, string_elements};
use crate::error::ComparisonError;

// ============================================================================
// STRING LISTS
// ============================================================================

/// Compare a string, or a list or set of strings, with a list of strings.
///
/// A leading `true` metadata value makes the comparison case-insensitive.
pub fn compare_strings(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let Dynamic::Strings(targets) = target else {
        return Err(ComparisonError::unexpected_target(
            "compare_strings",
            target,
            op,
            "[]string",
            None,
        ));
    };
    let fold = case_insensitive(meta);
    let targets: Vec<String> = targets.iter().map(|t| fold_case(t, fold)).collect();

    match av {
        AttrValue::String(_) => {
            compare_string_membership(&fold_case(&attr_value_to_string(av), fold), op, &targets)
        }
        AttrValue::List { .. } | AttrValue::Set { .. } => {
            let func = if matches!(av, AttrValue::List { .. }) {
                "compare_list_strings"
            } else {
                "compare_set_strings"
            };
            if collection_element_type(av) != Some(&AttrType::String) {
                return Err(ComparisonError::unexpected_actual(func, av.attr_type(), op, "string"));
            }
            let actuals: Vec<String> = string_elements(av)?
                .iter()
                .map(|s| fold_case(s, fold))
                .collect();
            compare_string_sequences(&actuals, op, &targets)
        }
        other => Err(ComparisonError::unexpected_actual(
            "compare_strings",
            other.attr_type(),
            op,
            "string",
        )),
    }
}

fn compare_string_membership(
    actual: &str,
    op: CompareOp,
    targets: &[String],
) -> Result<(), ComparisonError> {
    let found = targets.iter().any(|t| t == actual);
    let holds = match op {
        CompareOp::OneOf => found,
        CompareOp::NotOneOf => !found,
        _ => return Err(ComparisonError::no_strategy(op, "[]string")),
    };
    if holds {
        Ok(())
    } else {
        Err(ComparisonError::comparison_failed(actual, op, targets.to_vec()))
    }
}

fn compare_string_sequences(
    actuals: &[String],
    op: CompareOp,
    targets: &[String],
) -> Result<(), ComparisonError> {
    let first_mismatch = if actuals.len() == targets.len() {
        actuals.iter().zip(targets).position(|(a, t)| a != t)
    } else {
        Some(actuals.len().min(targets.len()))
    };

    match (op, first_mismatch) {
        (CompareOp::Equal, None) | (CompareOp::NotEqual, Some(_)) => Ok(()),
        (CompareOp::Equal, Some(i)) if actuals.len() == targets.len() => Err(
            ComparisonError::comparison_failed(actuals[i].as_str(), op, targets[i].as_str()),
        ),
        (CompareOp::Equal | CompareOp::NotEqual, _) => Err(ComparisonError::comparison_failed(
            actuals.to_vec(),
            op,
            targets.to_vec(),
        )),
        _ => Err(ComparisonError::no_strategy(op, "[]string")),
    }
}

// ============================================================================
// INT LISTS
// ============================================================================

/// Compare an integer, or a list or set of integers, with a list of
/// integers.
///
/// `Int64` and `Number` attributes are accepted; numbers truncate toward
/// zero.
pub fn compare_ints(
    av: &AttrValue,
    op: CompareOp,
    target: &Dynamic,
    _meta: &[Dynamic],
) -> Result<(), ComparisonError> {
    let targets = try_coerce_to_ints(target).map_err(|e| {
        ComparisonError::unexpected_target("compare_ints", target, op, "[]int64", Some(e))
    })?;

    match av {
        AttrValue::Number(_) if !av.is_known() => Err(ComparisonError::ComparisonFailed {
            actual: av.to_string(),
            op,
            expected: super::printable(&Dynamic::Ints(targets)),
        }),
        AttrValue::Int64(_) | AttrValue::Number(_) => {
            let (actual, _) = attr_value_to_i64(av)?;
            compare_int_membership(actual, op, &targets)
        }
        AttrValue::List { .. } | AttrValue::Set { .. } => {
            match collection_element_type(av) {
                Some(AttrType::Int64 | AttrType::Number) => {}
                _ => {
                    return Err(ComparisonError::unexpected_actual(
                        "compare_ints",
                        av.attr_type(),
                        op,
                        "int64",
                    ));
                }
            }
            let actuals = int_elements(av)?;
            compare_int_sequences(&actuals, op, &targets)
        }
        other => Err(ComparisonError::unexpected_actual(
            "compare_ints",
            other.attr_type(),
            op,
            "int64",
        )),
    }
}

fn compare_int_membership(actual: i64, op: CompareOp, targets: &[i64]) -> Result<(), ComparisonError> {
    let found = targets.contains(&actual);
    let holds = match op {
        CompareOp::OneOf => found,
        CompareOp::NotOneOf => !found,
        _ => return Err(ComparisonError::no_strategy(op, "[]int64")),
    };
    if holds {
        Ok(())
    } else {
        Err(ComparisonError::comparison_failed(actual, op, targets.to_vec()))
    }
}

fn compare_int_sequences(actuals: &[i64], op: CompareOp, targets: &[i64]) -> Result<(), ComparisonError> {
    let equal = actuals == targets;
    match op {
        CompareOp::Equal if equal => Ok(()),
        CompareOp::NotEqual if !equal => Ok(()),
        CompareOp::Equal | CompareOp::NotEqual => Err(ComparisonError::comparison_failed(
            actuals.to_vec(),
            op,
            targets.to_vec(),
        )),
        _ => Err(ComparisonError::no_strategy(op, "[]int64")),
    }
}
