//! Regular-expression validators.

use std::sync::Arc;

use regex::Regex;

use crate::conv::attr_value_to_string;
use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};

/// Test function failing when the string form of the value does not match
/// `re`.
pub fn regexp_match_test(re: Regex) -> TestFn {
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        let value = attr_value_to_string(req.config_value);
        if !re.is_match(&value) {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Field value does not match expression",
                format!("Field value {value:?} does not match expression {:?}", re.as_str()),
            );
        }
    })
}

/// Test function failing when the string form of the value matches `re`.
pub fn regexp_not_match_test(re: Regex) -> TestFn {
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        let value = attr_value_to_string(req.config_value);
        if re.is_match(&value) {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Field value must NOT match expression",
                format!("Field value {value:?} must not match expression {:?}", re.as_str()),
            );
        }
    })
}

/// Validator requiring values to match `pattern`. Null and unknown values
/// are skipped.
pub fn regexp_match(pattern: &str) -> Result<Generic, regex::Error> {
    let re = Regex::new(pattern)?;
    let description = format!("Ensure value matches expression {pattern:?}");
    Ok(Generic::new(GenericConfig {
        markdown_description: format!("Ensure value matches expression `{pattern}`"),
        description,
        test_fn: Some(regexp_match_test(re)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    }))
}

/// Validator requiring values not to match `pattern`. Null and unknown
/// values are skipped.
pub fn regexp_not_match(pattern: &str) -> Result<Generic, regex::Error> {
    let re = Regex::new(pattern)?;
    let description = format!("Ensure value does not match expression {pattern:?}");
    Ok(Generic::new(GenericConfig {
        markdown_description: format!("Ensure value does not match expression `{pattern}`"),
        description,
        test_fn: Some(regexp_not_match_test(re)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    }))
}
