//! URL validator.
//!
//! Values must parse as absolute URLs. Lists, sets and maps are checked
//! element by element, each failing element adding its own diagnostic.

use std::sync::Arc;

use attrval_core::AttrValue;
use url::Url;

use crate::conv::attr_value_to_string;
use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};

fn check_url(
    raw: &str,
    scheme: Option<&str>,
    port: Option<u16>,
    req: &ValidatorRequest<'_>,
    resp: &mut ValidatorResponse,
) {
    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Value is not parseable as URL",
                format!("Value {raw:?} is not parseable as URL: {err}"),
            );
            return;
        }
    };

    if let Some(required) = scheme
        && parsed.scheme() != required
    {
        resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "URL scheme mismatch",
            format!(
                "Defined scheme {:?} does not match required {required:?}",
                parsed.scheme()
            ),
        );
    }

    if let Some(required) = port {
        let defined = parsed.port_or_known_default();
        if defined != Some(required) {
            let defined = defined.map(|p| p.to_string()).unwrap_or_default();
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "URL port mismatch",
                format!(
                    "Defined port {defined:?} does not match required {:?}",
                    required.to_string()
                ),
            );
        }
    }
}

/// Test function behind [`is_url_with`]. `None` disables the scheme or
/// port check.
pub fn is_url_test(scheme: Option<String>, port: Option<u16>) -> TestFn {
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        let scheme = scheme.as_deref();
        match req.config_value {
            AttrValue::List { .. } | AttrValue::Set { .. } => {
                for element in req.config_value.elements().unwrap_or_default() {
                    check_url(&attr_value_to_string(element), scheme, port, req, resp);
                }
            }
            AttrValue::Map { entries, .. } => {
                for value in entries.known().into_iter().flat_map(|m| m.values()) {
                    check_url(&attr_value_to_string(value), scheme, port, req, resp);
                }
            }
            value => check_url(&attr_value_to_string(value), scheme, port, req, resp),
        }
    })
}

/// Validator requiring URL values with the given scheme and port. Null and
/// unknown values are skipped.
///
/// A port check compares against the scheme's default when the URL omits
/// it, so `https://example.com` satisfies a required port of `443`.
pub fn is_url_with(scheme: Option<&str>, port: Option<u16>) -> Generic {
    Generic::new(GenericConfig {
        description: "Tests if provided value is parseable as URL".into(),
        markdown_description: "Tests if provided value is parseable as URL".into(),
        test_fn: Some(is_url_test(scheme.map(str::to_owned), port)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
}

/// Validator requiring URL values.
pub fn is_url() -> Generic {
    is_url_with(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::evaluate;
    use attrval_core::AttrType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn summaries(validator: &Generic, value: &AttrValue) -> Vec<String> {
        let (_, resp) = evaluate(validator, value);
        resp.diagnostics.iter().map(|d| d.summary.to_string()).collect()
    }

    #[rstest]
    #[case("https://example.com")]
    #[case("http://localhost:8080/path?q=1")]
    #[case("postgres://user@db/app")]
    fn accepts_urls(#[case] raw: &str) {
        assert!(summaries(&is_url(), &AttrValue::string_value(raw)).is_empty());
    }

    #[rstest]
    #[case("not a url")]
    #[case("")]
    #[case("http://[::1")]
    fn rejects_garbage(#[case] raw: &str) {
        assert_eq!(
            summaries(&is_url(), &AttrValue::string_value(raw)),
            ["Value is not parseable as URL"]
        );
    }

    #[test]
    fn scheme_and_port_are_checked_independently() {
        let v = is_url_with(Some("https"), Some(8443));
        assert_eq!(
            summaries(&v, &AttrValue::string_value("http://example.com:80")),
            ["URL scheme mismatch", "URL port mismatch"]
        );
        assert!(summaries(&v, &AttrValue::string_value("https://example.com:8443")).is_empty());
    }

    #[test]
    fn default_port_counts() {
        let v = is_url_with(None, Some(443));
        assert!(summaries(&v, &AttrValue::string_value("https://example.com")).is_empty());
        let (_, resp) = evaluate(&v, &AttrValue::string_value("https://example.com:1"));
        assert_eq!(
            resp.diagnostics.as_slice()[0].detail,
            r#"Defined port "1" does not match required "443""#
        );
    }

    #[test]
    fn collections_are_checked_per_element() {
        let list = AttrValue::strings_to_list(&["https://a.example", "nope", "also nope"], false);
        assert_eq!(summaries(&is_url(), &list).len(), 2);

        let map = AttrValue::map_value(
            AttrType::String,
            BTreeMap::from([
                ("ok".to_owned(), AttrValue::string_value("https://a.example")),
                ("bad".to_owned(), AttrValue::string_value("nope")),
            ]),
        )
        .unwrap();
        assert_eq!(summaries(&is_url(), &map), ["Value is not parseable as URL"]);
    }
}
