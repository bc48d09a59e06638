//! Value-state classification.
//!
//! Every attribute value is exactly one of unknown, null, empty or valued.
//! When several apply, unknown wins over null and null wins over empty.

use std::fmt;

use attrval_core::AttrValue;

/// Definedness of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinednessState {
    Unknown,
    Null,
    /// Known, but a string with no characters or a collection with no elements.
    Empty,
    Valued,
}

impl DefinednessState {
    pub fn is_valued(self) -> bool {
        self == Self::Valued
    }
}

impl fmt::Display for DefinednessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Null => "null",
            Self::Empty => "empty",
            Self::Valued => "valued",
        })
    }
}

/// Why a value is not valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum StateError {
    #[error("value is unknown")]
    ValueIsUnknown,
    #[error("value is null")]
    ValueIsNull,
    #[error("value is empty")]
    ValueIsEmpty,
}

/// Classify `value`.
///
/// Numbers, booleans and objects are never empty.
pub fn classify_state(value: &AttrValue) -> DefinednessState {
    if value.is_unknown() {
        return DefinednessState::Unknown;
    }
    if value.is_null() {
        return DefinednessState::Null;
    }

    // No wildcard arm: a new value kind must decide its own emptiness rule.
    let empty = match value {
        AttrValue::String(state) => state.known().is_some_and(String::is_empty),
        AttrValue::List { elements, .. } | AttrValue::Set { elements, .. } => {
            elements.known().is_some_and(Vec::is_empty)
        }
        AttrValue::Map { entries, .. } => entries.known().is_some_and(|e| e.is_empty()),
        AttrValue::Bool(_)
        | AttrValue::Int64(_)
        | AttrValue::Float64(_)
        | AttrValue::Number(_)
        | AttrValue::Object { .. } => false,
    };

    if empty {
        DefinednessState::Empty
    } else {
        DefinednessState::Valued
    }
}

/// `Ok(())` when `value` is valued, otherwise the reason it is not.
pub fn test_attribute_value_state(value: &AttrValue) -> Result<(), StateError> {
    match classify_state(value) {
        DefinednessState::Unknown => Err(StateError::ValueIsUnknown),
        DefinednessState::Null => Err(StateError::ValueIsNull),
        DefinednessState::Empty => Err(StateError::ValueIsEmpty),
        DefinednessState::Valued => Ok(()),
    }
}

pub fn is_value_is_unknown_error(err: &StateError) -> bool {
    *err == StateError::ValueIsUnknown
}

pub fn is_value_is_null_error(err: &StateError) -> bool {
    *err == StateError::ValueIsNull
}

pub fn is_value_is_empty_error(err: &StateError) -> bool {
    *err == StateError::ValueIsEmpty
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrval_core::{AttrType, Decimal};
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    #[case::string_unknown(AttrValue::string_unknown(), DefinednessState::Unknown)]
    #[case::string_null(AttrValue::string_null(), DefinednessState::Null)]
    #[case::string_empty(AttrValue::string_value(""), DefinednessState::Empty)]
    #[case::string_valued(AttrValue::string_value("x"), DefinednessState::Valued)]
    #[case::bool_false(AttrValue::bool_value(false), DefinednessState::Valued)]
    #[case::int_zero(AttrValue::int64_value(0), DefinednessState::Valued)]
    #[case::number_zero(AttrValue::number_value(Decimal::ZERO), DefinednessState::Valued)]
    #[case::list_empty(AttrValue::strings_to_list::<&str>(&[], false), DefinednessState::Empty)]
    #[case::list_null(AttrValue::list_null(AttrType::String), DefinednessState::Null)]
    #[case::set_empty(AttrValue::ints_to_int64_set(&[], false), DefinednessState::Empty)]
    #[case::set_valued(AttrValue::ints_to_int64_set(&[1], false), DefinednessState::Valued)]
    #[case::set_unknown(AttrValue::set_unknown(AttrType::Int64), DefinednessState::Unknown)]
    #[case::map_empty(
        AttrValue::map_value(AttrType::String, BTreeMap::new()).unwrap(),
        DefinednessState::Empty
    )]
    #[case::float_zero(AttrValue::float64_value(0.0), DefinednessState::Valued)]
    #[case::number_null(AttrValue::number_null(), DefinednessState::Null)]
    #[case::map_unknown(AttrValue::map_unknown(AttrType::Bool), DefinednessState::Unknown)]
    #[case::object_valued(
        AttrValue::object_from([("a", AttrValue::string_value(""))]),
        DefinednessState::Valued
    )]
    #[case::object_null(AttrValue::null_of(&AttrType::object([("a", AttrType::String)])), DefinednessState::Null)]
    #[case::object_no_attributes(AttrValue::object_from::<[(&str, AttrValue); 0], &str>([]), DefinednessState::Valued)]
    fn classifies(#[case] value: AttrValue, #[case] expected: DefinednessState) {
        assert_eq!(classify_state(&value), expected);
    }

    #[test]
    fn state_errors_map_one_to_one() {
        let err = test_attribute_value_state(&AttrValue::int64_unknown()).unwrap_err();
        assert!(is_value_is_unknown_error(&err));
        assert!(!is_value_is_null_error(&err));

        let err = test_attribute_value_state(&AttrValue::string_value("")).unwrap_err();
        assert!(is_value_is_empty_error(&err));

        assert!(test_attribute_value_state(&AttrValue::bool_value(false)).is_ok());
    }
}
