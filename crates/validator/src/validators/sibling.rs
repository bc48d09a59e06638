//! Validators relating an attribute to a sibling.
//!
//! A sibling is the attribute named `sibling` under the same parent as the
//! attribute being validated. When the sibling cannot be resolved the check
//! passes silently; the host reports unknown attributes on its own.

use std::sync::Arc;

use attrval_core::{AttrValue, Path};

use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};
use crate::state::{DefinednessState, classify_state, test_attribute_value_state};

fn sibling_value(req: &ValidatorRequest<'_>, sibling: &str) -> Option<(Path, AttrValue)> {
    let path = req.path.parent_path().at_name(sibling);
    match req.config.get_attribute(&path) {
        Ok(value) => Some((path, value)),
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "sibling attribute lookup failed");
            None
        }
    }
}

/// Test function behind [`mutually_exclusive_sibling`].
pub fn mutually_exclusive_sibling_test(sibling: impl Into<String>) -> TestFn {
    let sibling = sibling.into();
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        if test_attribute_value_state(req.config_value).is_err() {
            return;
        }
        let Some((sibling_path, sibling_value)) = sibling_value(req, &sibling) else {
            return;
        };
        if test_attribute_value_state(&sibling_value).is_err() {
            return;
        }
        resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "Mutually exclusive value error",
            format!(
                "Cannot provide value to both {:?} and {:?}",
                req.path.to_string(),
                sibling_path.to_string()
            ),
        );
    })
}

/// Validator allowing a value only while `sibling` has none. Null and
/// unknown values are skipped.
pub fn mutually_exclusive_sibling(sibling: &str) -> Generic {
    let description = format!("Ensures attribute is only valued if sibling attribute {sibling:?} is empty");
    Generic::new(GenericConfig {
        markdown_description: description.clone(),
        description,
        test_fn: Some(mutually_exclusive_sibling_test(sibling)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
}

/// Test function behind [`mutually_inclusive_sibling`].
pub fn mutually_inclusive_sibling_test(sibling: impl Into<String>) -> TestFn {
    let sibling = sibling.into();
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        // An unknown value may still resolve, so only null and empty fail.
        match classify_state(req.config_value) {
            DefinednessState::Valued | DefinednessState::Unknown => return,
            DefinednessState::Null | DefinednessState::Empty => {}
        }
        let Some((sibling_path, sibling_value)) = sibling_value(req, &sibling) else {
            return;
        };
        if test_attribute_value_state(&sibling_value).is_err() {
            return;
        }
        resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "Mutually inclusive value error",
            format!(
                "Attribute {:?} is required when sibling attribute {:?} is valued",
                req.path.to_string(),
                sibling_path.to_string()
            ),
        );
    })
}

/// Validator requiring a value whenever `sibling` has one. Runs on null
/// values, which is the case it exists to catch.
pub fn mutually_inclusive_sibling(sibling: &str) -> Generic {
    let description = format!("Ensure attribute is valued when sibling attribute {sibling:?} is also valued");
    Generic::new(GenericConfig {
        markdown_description: description.clone(),
        description,
        test_fn: Some(mutually_inclusive_sibling_test(sibling)),
        skip_when_null: false,
        skip_when_unknown: false,
        ..GenericConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::Outcome;
    use crate::validators::test_support::evaluate_at;
    use attrval_core::Config;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config(a: AttrValue, b: AttrValue) -> Config {
        Config::new(AttrValue::object_from([("a", a), ("b", b)])).unwrap()
    }

    fn summaries(validator: &Generic, config: &Config) -> (Outcome, Vec<String>) {
        let (outcome, resp) = evaluate_at(validator, config, &Path::root("a"));
        let summaries = resp.diagnostics.iter().map(|d| d.summary.to_string()).collect();
        (outcome, summaries)
    }

    #[rstest]
    #[case::both(AttrValue::string_value("x"), AttrValue::string_value("y"), 1)]
    #[case::sibling_null(AttrValue::string_value("x"), AttrValue::string_null(), 0)]
    #[case::sibling_empty(AttrValue::string_value("x"), AttrValue::string_value(""), 0)]
    #[case::sibling_unknown(AttrValue::string_value("x"), AttrValue::string_unknown(), 0)]
    #[case::self_empty(AttrValue::string_value(""), AttrValue::string_value("y"), 0)]
    #[case::other_type(AttrValue::string_value("x"), AttrValue::int64_value(1), 1)]
    fn exclusive(#[case] a: AttrValue, #[case] b: AttrValue, #[case] errors: usize) {
        let (_, got) = summaries(&mutually_exclusive_sibling("b"), &config(a, b));
        assert_eq!(got.len(), errors);
    }

    #[test]
    fn exclusive_detail_names_both_paths() {
        let (_, resp) = evaluate_at(
            &mutually_exclusive_sibling("b"),
            &config(AttrValue::string_value("x"), AttrValue::string_value("y")),
            &Path::root("a"),
        );
        assert_eq!(
            resp.diagnostics.as_slice()[0].detail,
            r#"Cannot provide value to both "a" and "b""#
        );
    }

    #[rstest]
    #[case::self_null_sibling_valued(AttrValue::string_null(), AttrValue::string_value("y"), 1)]
    #[case::self_empty_sibling_valued(AttrValue::string_value(""), AttrValue::string_value("y"), 1)]
    #[case::both_null(AttrValue::string_null(), AttrValue::string_null(), 0)]
    #[case::self_valued(AttrValue::string_value("x"), AttrValue::string_value("y"), 0)]
    #[case::self_unknown(AttrValue::string_unknown(), AttrValue::string_value("y"), 0)]
    fn inclusive(#[case] a: AttrValue, #[case] b: AttrValue, #[case] errors: usize) {
        let (outcome, got) = summaries(&mutually_inclusive_sibling("b"), &config(a, b));
        assert_eq!(outcome, Outcome::Evaluated);
        assert_eq!(got.len(), errors);
    }

    #[test]
    fn missing_sibling_passes() {
        let config = Config::new(AttrValue::object_from([("a", AttrValue::string_null())])).unwrap();
        let (_, got) = summaries(&mutually_inclusive_sibling("nope"), &config);
        assert!(got.is_empty());
    }

    #[test]
    fn nested_siblings_share_a_parent() {
        let block = AttrValue::object_from([
            ("a", AttrValue::string_value("x")),
            ("b", AttrValue::string_value("y")),
        ]);
        let list = AttrValue::list_value(block.attr_type(), vec![block]).unwrap();
        let config = Config::new(AttrValue::object_from([("blocks", list)])).unwrap();
        let path = Path::root("blocks").at_list_index(0).at_name("a");

        let (_, resp) = evaluate_at(&mutually_exclusive_sibling("b"), &config, &path);
        assert_eq!(
            resp.diagnostics.as_slice()[0].detail,
            r#"Cannot provide value to both "blocks.[0].a" and "blocks.[0].b""#
        );
        assert_eq!(
            resp.diagnostics.as_slice()[0].path.as_ref().map(ToString::to_string),
            Some("blocks.[0].a".to_owned())
        );
    }
}
