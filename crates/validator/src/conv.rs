//! Attribute-value conversions.
//!
//! Unvalued `Number` attributes convert to zero; every other unvalued scalar
//! is a [`ConversionError::NotValued`].

use attrval_core::{AttrType, AttrValue, Tristate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::coerce::{f64_to_i64, parse_decimal};
use crate::error::ConversionError;
use crate::state::StateError;

/// How a converted value relates to the exact source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accuracy {
    /// The result is smaller than the source.
    Below,
    Exact,
    /// The result is larger than the source.
    Above,
}

impl Accuracy {
    fn of(result: Option<std::cmp::Ordering>) -> Self {
        match result {
            Some(std::cmp::Ordering::Less) => Self::Below,
            Some(std::cmp::Ordering::Greater) => Self::Above,
            Some(std::cmp::Ordering::Equal) | None => Self::Exact,
        }
    }
}

fn known<T>(state: &Tristate<T>) -> Result<&T, ConversionError> {
    match state {
        Tristate::Known(v) => Ok(v),
        Tristate::Unknown => Err(ConversionError::NotValued(StateError::ValueIsUnknown)),
        Tristate::Null => Err(ConversionError::NotValued(StateError::ValueIsNull)),
    }
}

fn known_or_zero(state: &Tristate<Decimal>) -> Decimal {
    state.known().copied().unwrap_or(Decimal::ZERO)
}

/// String form of `value`.
///
/// Strings yield their content (empty when unvalued); every other value
/// yields its display form.
pub fn attr_value_to_string(value: &AttrValue) -> String {
    match value {
        AttrValue::String(state) => state.known().cloned().unwrap_or_default(),
        other => other.to_string(),
    }
}

/// String form of each element of a list or set, or a single-element vector
/// for any other value.
pub fn attr_value_to_strings(value: &AttrValue) -> Vec<String> {
    match value {
        AttrValue::List { .. } | AttrValue::Set { .. } => value
            .elements()
            .map(|elements| elements.iter().map(attr_value_to_string).collect())
            .unwrap_or_default(),
        other => vec![attr_value_to_string(other)],
    }
}

/// Character count of a string, or element count of a list, set or map.
///
/// Unvalued values have length zero. `None` for types without a length.
pub fn attr_value_length(value: &AttrValue) -> Option<usize> {
    match value {
        AttrValue::String(state) => Some(state.known().map_or(0, |s| s.chars().count())),
        AttrValue::List { elements, .. } | AttrValue::Set { elements, .. } => {
            Some(elements.known().map_or(0, Vec::len))
        }
        AttrValue::Map { entries, .. } => Some(entries.known().map_or(0, |e| e.len())),
        AttrValue::Bool(_)
        | AttrValue::Int64(_)
        | AttrValue::Float64(_)
        | AttrValue::Number(_)
        | AttrValue::Object { .. } => None,
    }
}

/// Convert `value` to `f64`, reporting rounding through [`Accuracy`].
pub fn attr_value_to_f64(value: &AttrValue) -> Result<(f64, Accuracy), ConversionError> {
    match value {
        AttrValue::Float64(state) => Ok((*known(state)?, Accuracy::Exact)),
        AttrValue::Int64(state) => {
            let exact = *known(state)?;
            let result = exact as f64;
            // Compare in i128 so 2^63 does not saturate back to i64::MAX.
            let accuracy = Accuracy::of(Some((result as i128).cmp(&i128::from(exact))));
            Ok((result, accuracy))
        }
        AttrValue::Number(state) => {
            let exact = known_or_zero(state);
            let result = exact
                .to_f64()
                .ok_or_else(|| ConversionError::out_of_range("float64", exact))?;
            let accuracy = Accuracy::of(
                Decimal::try_from(result)
                    .ok()
                    .map(|back| back.cmp(&exact)),
            );
            Ok((result, accuracy))
        }
        AttrValue::String(state) => {
            let s = known(state)?;
            let result = s
                .parse::<f64>()
                .map_err(|e| ConversionError::parse("float64", s.as_str(), e))?;
            Ok((result, Accuracy::Exact))
        }
        other => Err(ConversionError::unhandled("float64", other.attr_type().to_string())),
    }
}

/// Convert `value` to `i64`, truncating toward zero and reporting the
/// truncation through [`Accuracy`].
pub fn attr_value_to_i64(value: &AttrValue) -> Result<(i64, Accuracy), ConversionError> {
    match value {
        AttrValue::Int64(state) => Ok((*known(state)?, Accuracy::Exact)),
        AttrValue::Float64(state) => {
            let exact = *known(state)?;
            let result =
                f64_to_i64(exact).ok_or_else(|| ConversionError::out_of_range("int64", exact))?;
            Ok((result, Accuracy::of((result as f64).partial_cmp(&exact))))
        }
        AttrValue::Number(state) => {
            let exact = known_or_zero(state);
            let truncated = exact.trunc();
            let result = truncated
                .to_i64()
                .ok_or_else(|| ConversionError::out_of_range("int64", exact))?;
            Ok((result, Accuracy::of(Some(truncated.cmp(&exact)))))
        }
        AttrValue::String(state) => {
            let s = known(state)?;
            let result = s
                .parse::<i64>()
                .map_err(|e| ConversionError::parse("int64", s.as_str(), e))?;
            Ok((result, Accuracy::Exact))
        }
        other => Err(ConversionError::unhandled("int64", other.attr_type().to_string())),
    }
}

/// Convert `value` to an arbitrary-precision decimal.
pub fn attr_value_to_decimal(value: &AttrValue) -> Result<Decimal, ConversionError> {
    match value {
        AttrValue::Number(state) => Ok(known_or_zero(state)),
        AttrValue::Int64(state) => Ok(Decimal::from(*known(state)?)),
        AttrValue::Float64(state) => {
            let f = *known(state)?;
            Decimal::try_from(f).map_err(|_| ConversionError::out_of_range("decimal", f))
        }
        AttrValue::String(state) => parse_decimal(known(state)?),
        other => Err(ConversionError::unhandled("decimal", other.attr_type().to_string())),
    }
}

/// String content of each element of a known list or set of strings.
pub fn string_elements(value: &AttrValue) -> Result<Vec<String>, ConversionError> {
    let elements = collection_elements(value, "[]string")?;
    elements
        .iter()
        .enumerate()
        .map(|(offset, element)| match element {
            AttrValue::String(state) => known(state).cloned().map_err(|e| {
                ConversionError::element(offset, element.to_string(), e)
            }),
            other => Err(ConversionError::element(
                offset,
                other.to_string(),
                ConversionError::unhandled("string", other.attr_type().to_string()),
            )),
        })
        .collect()
}

/// Integer value of each element of a known list or set of `Int64` or
/// `Number` values. Fractional numbers truncate toward zero.
pub fn int_elements(value: &AttrValue) -> Result<Vec<i64>, ConversionError> {
    let elements = collection_elements(value, "[]int64")?;
    elements
        .iter()
        .enumerate()
        .map(|(offset, element)| match element {
            AttrValue::Int64(_) | AttrValue::Number(_) => attr_value_to_i64(element)
                .map(|(v, _)| v)
                .map_err(|e| ConversionError::element(offset, element.to_string(), e)),
            other => Err(ConversionError::element(
                offset,
                other.to_string(),
                ConversionError::unhandled("int64", other.attr_type().to_string()),
            )),
        })
        .collect()
}

fn collection_elements<'a>(
    value: &'a AttrValue,
    target: &'static str,
) -> Result<&'a [AttrValue], ConversionError> {
    match value {
        AttrValue::List { elements, .. } | AttrValue::Set { elements, .. } => {
            known(elements).map(Vec::as_slice)
        }
        other => Err(ConversionError::unhandled(target, other.attr_type().to_string())),
    }
}

/// Element type of a list or set value.
pub(crate) fn collection_element_type(value: &AttrValue) -> Option<&AttrType> {
    match value {
        AttrValue::List { element_type, .. } | AttrValue::Set { element_type, .. } => {
            Some(element_type)
        }
        _ => None,
    }
}
