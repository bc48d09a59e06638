//! Length bounds for strings and collections.
//!
//! Bounds use `-1` for "unbounded". Strings are measured in characters,
//! collections in elements.

use std::sync::Arc;

use crate::conv::attr_value_length;
use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};

/// Marker for an unbounded minimum or maximum.
pub const UNBOUNDED: i64 = -1;

/// Test function checking `min <= length <= max`.
///
/// Misconfigured bounds are reported instead of checked: both unbounded is
/// a warning, any other negative bound or `min > max` is an error.
pub fn length_test(min: i64, max: i64) -> TestFn {
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        if min == UNBOUNDED && max == UNBOUNDED {
            resp.diagnostics.add_attribute_warning(
                req.path.clone(),
                "Length validation is unbounded, there is nothing to verify",
                "Both minimum and maximum length were set to -1. This has no purpose and should be rectified.",
            );
            return;
        }
        if min < UNBOUNDED || max < UNBOUNDED {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Cannot use negative value for length check",
                format!(
                    "The provided minimum length {min} and / or maximum length {max} are negative. \
                     The only valid negative value is -1 to indicate \"unbounded\"."
                ),
            );
            return;
        }
        if max != UNBOUNDED && min > max {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Minimum length value is greater than maximum length value",
                format!(
                    "The provided minimum length {min} is greater than the provided maximum length {max}."
                ),
            );
            return;
        }

        let Some(length) = attr_value_length(req.config_value) else {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Attribute value has no length",
                format!(
                    "Length cannot be checked on a value of type {}",
                    req.config_value.attr_type()
                ),
            );
            return;
        };
        let length = i64::try_from(length).unwrap_or(i64::MAX);

        if min > UNBOUNDED && length < min {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Field value length is below minimum threshold",
                format!("Field value length {length} is less than minimum allowed of {min}"),
            );
        }
        if max > UNBOUNDED && length > max {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Field value length is above maximum threshold",
                format!("Field value length {length} is greater than the maximum allowed of {max}"),
            );
        }
    })
}

/// Validator checking the length of strings and collections. Null and
/// unknown values are skipped.
pub fn length(min: i64, max: i64) -> Generic {
    let description = format!(
        "Asserts an attribute's value contains no less than {min} and no more than {max} elements, with -1 meaning unbounded"
    );
    Generic::new(GenericConfig {
        markdown_description: description.clone(),
        description,
        test_fn: Some(length_test(min, max)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::evaluate;
    use attrval_core::{AttrValue, Severity};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn summaries(min: i64, max: i64, value: &AttrValue) -> Vec<String> {
        let (_, resp) = evaluate(&length(min, max), value);
        resp.diagnostics
            .iter()
            .map(|d| d.summary.to_string())
            .collect()
    }

    #[rstest]
    #[case::within(2, 4, "abc")]
    #[case::min_only(3, UNBOUNDED, "abc")]
    #[case::max_only(UNBOUNDED, 3, "abc")]
    #[case::counts_chars(1, 2, "é!")]
    fn accepts(#[case] min: i64, #[case] max: i64, #[case] value: &str) {
        assert!(summaries(min, max, &AttrValue::string_value(value)).is_empty());
    }

    #[test]
    fn reports_below_and_above() {
        assert_eq!(
            summaries(2, 5, &AttrValue::string_value("a")),
            ["Field value length is below minimum threshold"]
        );
        assert_eq!(
            summaries(0, 1, &AttrValue::strings_to_list(&["a", "b"], false)),
            ["Field value length is above maximum threshold"]
        );
    }

    #[test]
    fn unbounded_is_a_warning() {
        let (_, resp) = evaluate(&length(UNBOUNDED, UNBOUNDED), &AttrValue::string_value("a"));
        assert_eq!(resp.diagnostics.len(), 1);
        assert_eq!(resp.diagnostics.as_slice()[0].severity, Severity::Warning);
    }

    #[rstest]
    #[case::negative(-2, 3, "Cannot use negative value for length check")]
    #[case::inverted(5, 2, "Minimum length value is greater than maximum length value")]
    fn misconfigured_bounds(#[case] min: i64, #[case] max: i64, #[case] summary: &str) {
        assert_eq!(summaries(min, max, &AttrValue::string_value("abc")), [summary]);
    }

    #[test]
    fn scalar_without_length_is_an_error() {
        assert_eq!(
            summaries(1, 2, &AttrValue::int64_value(3)),
            ["Attribute value has no length"]
        );
    }
}
