//! Declarative validator configuration.
//!
//! Validators can be described in JSON and built against a
//! [`ComparisonRegistry`]:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrval_validator::compare::ComparisonRegistry;
//! use attrval_validator::config::ValidatorSpec;
//! use attrval_validator::generic::AttributeValidator;
//!
//! let spec = ValidatorSpec::from_json_str(r#"{"type": "compare", "op": ">=", "target": 1}"#).unwrap();
//! let validator = spec.build(&Arc::new(ComparisonRegistry::new())).unwrap();
//! assert_eq!(validator.description(), r#"Asserts an attribute is ">=" to int64(1)"#);
//! ```
//!
//! A [`RuleSet`] groups specs per top-level attribute and validates a whole
//! [`Config`] in one call.

use std::collections::BTreeMap;
use std::sync::Arc;

use attrval_core::{Config, Diagnostics, Path};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::coerce::Dynamic;
use crate::compare::{CompareOp, ComparisonRegistry};
use crate::generic::{AttributeValidator, Generic, ValidatorRequest, ValidatorResponse};
use crate::validators;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors from loading or building validator specs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid validator config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported comparison target {value}")]
    UnsupportedTarget { value: Json },
}

// ============================================================================
// VALIDATOR SPEC
// ============================================================================

const fn unbounded() -> i64 {
    validators::UNBOUNDED
}

/// One validator, as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidatorSpec {
    Required,
    RegexpMatch {
        pattern: String,
    },
    RegexpNotMatch {
        pattern: String,
    },
    Length {
        #[serde(default = "unbounded")]
        min: i64,
        #[serde(default = "unbounded")]
        max: i64,
    },
    Compare {
        op: CompareOp,
        /// Scalar, array of strings, array of integers,
        /// `{"ints": [..]}` for an explicitly typed integer list, or
        /// `{"decimal": "1.5"}` for an exact decimal.
        target: Json,
        #[serde(default)]
        case_insensitive: bool,
    },
    IsUrl {
        #[serde(default)]
        scheme: Option<String>,
        #[serde(default)]
        port: Option<u16>,
    },
    IsDuration,
    MutuallyExclusiveSibling {
        sibling: String,
    },
    MutuallyInclusiveSibling {
        sibling: String,
    },
}

impl ValidatorSpec {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_value(value: Json) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build the validator. Comparisons dispatch through `registry`.
    pub fn build(&self, registry: &Arc<ComparisonRegistry>) -> Result<Generic, ConfigError> {
        let pattern_error = |pattern: &str| {
            let pattern = pattern.to_owned();
            move |source: regex::Error| ConfigError::Pattern { pattern, source }
        };

        Ok(match self {
            Self::Required => validators::required(),
            Self::RegexpMatch { pattern } => {
                validators::regexp_match(pattern).map_err(pattern_error(pattern))?
            }
            Self::RegexpNotMatch { pattern } => {
                validators::regexp_not_match(pattern).map_err(pattern_error(pattern))?
            }
            Self::Length { min, max } => validators::length(*min, *max),
            Self::Compare {
                op,
                target,
                case_insensitive,
            } => {
                let target = json_to_dynamic(target)?;
                if *case_insensitive {
                    validators::compare_case_insensitive(registry, *op, target)
                } else {
                    validators::compare(registry, *op, target)
                }
            }
            Self::IsUrl { scheme, port } => validators::is_url_with(scheme.as_deref(), *port),
            Self::IsDuration => validators::is_duration_string(),
            Self::MutuallyExclusiveSibling { sibling } => {
                validators::mutually_exclusive_sibling(sibling)
            }
            Self::MutuallyInclusiveSibling { sibling } => {
                validators::mutually_inclusive_sibling(sibling)
            }
        })
    }
}

/// Map a JSON comparison target onto a [`Dynamic`].
///
/// A bare `[]` is an empty string list. Write `{"ints": []}` for an empty
/// integer list.
pub fn json_to_dynamic(value: &Json) -> Result<Dynamic, ConfigError> {
    let unsupported = || ConfigError::UnsupportedTarget {
        value: value.clone(),
    };

    match value {
        Json::Bool(b) => Ok(Dynamic::Bool(*b)),
        Json::Number(n) => n
            .as_i64()
            .map(Dynamic::Int64)
            .or_else(|| n.as_f64().map(Dynamic::Float64))
            .ok_or_else(unsupported),
        Json::String(s) => Ok(Dynamic::String(s.clone())),
        Json::Array(items) if items.iter().all(Json::is_string) => Ok(Dynamic::Strings(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
        )),
        Json::Array(items) => items
            .iter()
            .map(Json::as_i64)
            .collect::<Option<Vec<_>>>()
            .map(Dynamic::Ints)
            .ok_or_else(unsupported),
        Json::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((key, Json::String(literal))) if key == "decimal" => literal
                .parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(literal))
                .map(Dynamic::Decimal)
                .map_err(|_| unsupported()),
            Some((key, Json::Array(items))) if key == "ints" => items
                .iter()
                .map(Json::as_i64)
                .collect::<Option<Vec<_>>>()
                .map(Dynamic::Ints)
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        },
        Json::Object(_) => Err(unsupported()),
        Json::Null => Err(unsupported()),
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Validator specs keyed by top-level attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub attributes: BTreeMap<String, Vec<ValidatorSpec>>,
}

impl RuleSet {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build every validator. Fails on the first invalid spec.
    pub fn build(&self, registry: &Arc<ComparisonRegistry>) -> Result<CompiledRules, ConfigError> {
        let rules = self
            .attributes
            .iter()
            .map(|(name, specs)| {
                let built = specs
                    .iter()
                    .map(|spec| spec.build(registry))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((Path::root(name.as_str()), built))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        tracing::debug!(attributes = rules.len(), "validator rule set built");
        Ok(CompiledRules { rules })
    }
}

/// A built [`RuleSet`].
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: Vec<(Path, Vec<Generic>)>,
}

impl CompiledRules {
    /// Run every validator against its attribute in `config`.
    ///
    /// An attribute that cannot be resolved gets one error and its
    /// validators are not run.
    pub fn validate(&self, config: &Config) -> Diagnostics {
        let mut resp = ValidatorResponse::default();
        for (path, validators) in &self.rules {
            let value = match config.get_attribute(path) {
                Ok(value) => value,
                Err(err) => {
                    resp.diagnostics.add_attribute_error(
                        path.clone(),
                        "Attribute not found",
                        err.to_string(),
                    );
                    continue;
                }
            };
            let expr = path.expression();
            let req = ValidatorRequest::new(path, &expr, config, &value);
            for validator in validators {
                validator.validate(&req, &mut resp);
            }
        }
        resp.diagnostics
    }

    pub fn len(&self) -> usize {
        self.rules.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::evaluate;
    use attrval_core::AttrValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(true), Dynamic::Bool(true))]
    #[case(json!(3), Dynamic::Int64(3))]
    #[case(json!(1.5), Dynamic::Float64(1.5))]
    #[case(json!("x"), Dynamic::String("x".into()))]
    #[case(json!(["a", "b"]), Dynamic::Strings(vec!["a".into(), "b".into()]))]
    #[case(json!([1, 2]), Dynamic::Ints(vec![1, 2]))]
    #[case(json!([]), Dynamic::Strings(vec![]))]
    #[case(json!({"decimal": "0.1"}), Dynamic::Decimal(Decimal::new(1, 1)))]
    #[case(json!({"ints": []}), Dynamic::Ints(vec![]))]
    #[case(json!({"ints": [4, 5]}), Dynamic::Ints(vec![4, 5]))]
    fn maps_targets(#[case] json: Json, #[case] expected: Dynamic) {
        assert_eq!(json_to_dynamic(&json).unwrap(), expected);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([1, "a"]))]
    #[case(json!({"other": 1}))]
    #[case(json!({"decimal": "abc"}))]
    #[case(json!({"ints": ["a"]}))]
    #[case(json!({"ints": [], "decimal": "1"}))]
    fn rejects_targets(#[case] json: Json) {
        assert!(matches!(
            json_to_dynamic(&json),
            Err(ConfigError::UnsupportedTarget { .. })
        ));
    }

    #[test]
    fn parses_every_kind() {
        let specs: Vec<ValidatorSpec> = serde_json::from_value(json!([
            {"type": "required"},
            {"type": "regexp_match", "pattern": "^a"},
            {"type": "regexp_not_match", "pattern": "b$"},
            {"type": "length", "min": 1},
            {"type": "compare", "op": "one_of", "target": ["a"], "case_insensitive": true},
            {"type": "is_url", "scheme": "https"},
            {"type": "is_duration"},
            {"type": "mutually_exclusive_sibling", "sibling": "x"},
            {"type": "mutually_inclusive_sibling", "sibling": "y"}
        ]))
        .unwrap();
        assert_eq!(specs[3], ValidatorSpec::Length { min: 1, max: -1 });
        assert_eq!(
            specs[5],
            ValidatorSpec::IsUrl {
                scheme: Some("https".into()),
                port: None
            }
        );

        let registry = Arc::new(ComparisonRegistry::new());
        for spec in &specs {
            spec.build(&registry).unwrap();
        }
    }

    #[test]
    fn bad_pattern_is_reported() {
        let spec = ValidatorSpec::RegexpMatch {
            pattern: "(".into(),
        };
        let err = spec.build(&Arc::new(ComparisonRegistry::new())).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn unknown_type_is_a_json_error() {
        assert!(matches!(
            ValidatorSpec::from_json_str(r#"{"type": "is_email"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn empty_int_list_target() {
        let spec = ValidatorSpec::from_json_str(
            r#"{"type": "compare", "op": "<>", "target": {"ints": []}}"#,
        )
        .unwrap();
        let validator = spec.build(&Arc::new(ComparisonRegistry::new())).unwrap();

        let (_, resp) = evaluate(&validator, &AttrValue::ints_to_int64_list(&[1], false));
        assert!(resp.diagnostics.is_empty(), "{}", resp.diagnostics);
        let (_, resp) = evaluate(&validator, &AttrValue::ints_to_int64_list(&[], false));
        assert_eq!(resp.diagnostics.len(), 1);
    }
}
