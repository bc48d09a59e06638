//! Generic attribute validator.
//!
//! [`Generic`] wraps a test function with a description and a skip policy.
//! Every built-in validator is a `Generic`; callers build their own by
//! filling in a [`GenericConfig`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrval_core::{AttrType, AttrValue, Config, Path};
//! use attrval_validator::generic::{
//!     AttributeValidator, Generic, GenericConfig, ValidatorRequest, ValidatorResponse,
//! };
//!
//! let no_admin = Generic::new(GenericConfig {
//!     description: "Value must not be \"admin\"".into(),
//!     skip_when_null: true,
//!     skip_when_unknown: true,
//!     test_fn: Some(Arc::new(|req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
//!         if req.config_value.as_str() == Some("admin") {
//!             resp.diagnostics.add_attribute_error(req.path.clone(), "Reserved name", "\"admin\" is reserved");
//!         }
//!     })),
//!     ..GenericConfig::default()
//! });
//!
//! let config = Config::new(AttrValue::object_from([("user", AttrValue::string_value("admin"))])).unwrap();
//! let path = Path::root("user");
//! let expr = path.expression();
//! let value = config.get_attribute(&path).unwrap();
//!
//! let mut resp = ValidatorResponse::default();
//! no_admin.validate(&ValidatorRequest::new(&path, &expr, &config, &value), &mut resp);
//! assert!(resp.diagnostics.has_error());
//! ```

use std::fmt;
use std::sync::Arc;

use attrval_core::{AttrValue, Config, Diagnostics, Path, PathExpression};

use crate::state::{DefinednessState, classify_state};

// ============================================================================
// REQUEST / RESPONSE
// ============================================================================

/// Input handed to a validator for one attribute.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorRequest<'a> {
    /// Location of the attribute.
    pub path: &'a Path,
    /// Expression the validator was attached with.
    pub path_expression: &'a PathExpression,
    /// Whole configuration, for sibling lookups.
    pub config: &'a Config,
    /// Value under validation.
    pub config_value: &'a AttrValue,
}

impl<'a> ValidatorRequest<'a> {
    pub const fn new(
        path: &'a Path,
        path_expression: &'a PathExpression,
        config: &'a Config,
        config_value: &'a AttrValue,
    ) -> Self {
        Self {
            path,
            path_expression,
            config,
            config_value,
        }
    }
}

/// Output a validator appends findings to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorResponse {
    pub diagnostics: Diagnostics,
}

/// The test a [`Generic`] runs.
pub type TestFn = Arc<dyn Fn(&ValidatorRequest<'_>, &mut ValidatorResponse) + Send + Sync>;

/// Computes descriptions on demand, taking precedence over the static
/// strings in [`GenericConfig`].
pub trait Describer: Send + Sync {
    fn description(&self) -> String;

    fn markdown_description(&self) -> String {
        self.description()
    }
}

/// Validator interface a host invokes for each attribute.
pub trait AttributeValidator: Send + Sync {
    fn description(&self) -> String;

    fn markdown_description(&self) -> String;

    fn validate(&self, req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse);
}

/// Run every validator against one request and collect the diagnostics in
/// order.
pub fn validate_all(validators: &[&dyn AttributeValidator], req: &ValidatorRequest<'_>) -> Diagnostics {
    let mut resp = ValidatorResponse::default();
    for validator in validators {
        validator.validate(req, &mut resp);
    }
    resp.diagnostics
}

// ============================================================================
// GENERIC VALIDATOR
// ============================================================================

/// Construction parameters for [`Generic`].
#[derive(Clone, Default)]
pub struct GenericConfig {
    pub description: String,
    pub markdown_description: String,
    pub describer: Option<Arc<dyn Describer>>,
    /// Required; [`Generic::new`] panics without it.
    pub test_fn: Option<TestFn>,
    pub skip_when_null: bool,
    pub skip_when_unknown: bool,
}

/// Whether [`Generic::evaluate`] ran the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Evaluated,
}

/// Validator built from a test function and a skip policy.
///
/// Unknown and null values are skipped before the test runs when the
/// matching flag is set; empty values always reach the test.
#[derive(Clone)]
pub struct Generic {
    description: String,
    markdown_description: String,
    describer: Option<Arc<dyn Describer>>,
    test_fn: TestFn,
    skip_when_null: bool,
    skip_when_unknown: bool,
}

impl Generic {
    /// Build a validator.
    ///
    /// # Panics
    ///
    /// Panics when `config.test_fn` is `None`.
    pub fn new(config: GenericConfig) -> Self {
        let Some(test_fn) = config.test_fn else {
            panic!("generic validator requires a test function");
        };
        Self {
            description: config.description,
            markdown_description: config.markdown_description,
            describer: config.describer,
            test_fn,
            skip_when_null: config.skip_when_null,
            skip_when_unknown: config.skip_when_unknown,
        }
    }

    pub fn skip_when_null(&self) -> bool {
        self.skip_when_null
    }

    pub fn skip_when_unknown(&self) -> bool {
        self.skip_when_unknown
    }

    /// Apply the skip policy, then run the test.
    pub fn evaluate(&self, req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse) -> Outcome {
        let state = classify_state(req.config_value);
        let skip = match state {
            DefinednessState::Unknown => self.skip_when_unknown,
            DefinednessState::Null => self.skip_when_null,
            DefinednessState::Empty | DefinednessState::Valued => false,
        };
        if skip {
            tracing::trace!(path = %req.path, state = %state, "skipping attribute validation");
            return Outcome::Skipped;
        }

        let before = resp.diagnostics.len();
        (self.test_fn)(req, resp);
        tracing::trace!(
            path = %req.path,
            state = %state,
            diagnostics = resp.diagnostics.len() - before,
            "attribute validated"
        );
        Outcome::Evaluated
    }
}

impl AttributeValidator for Generic {
    fn description(&self) -> String {
        match &self.describer {
            Some(describer) => describer.description(),
            None => self.description.clone(),
        }
    }

    fn markdown_description(&self) -> String {
        match &self.describer {
            Some(describer) => describer.markdown_description(),
            None if self.markdown_description.is_empty() => self.description.clone(),
            None => self.markdown_description.clone(),
        }
    }

    fn validate(&self, req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse) {
        self.evaluate(req, resp);
    }
}

impl fmt::Debug for Generic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generic")
            .field("description", &self.description())
            .field("skip_when_null", &self.skip_when_null)
            .field("skip_when_unknown", &self.skip_when_unknown)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrval_core::AttrType;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(skip_when_null: bool, skip_when_unknown: bool) -> (Generic, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let validator = Generic::new(GenericConfig {
            skip_when_null,
            skip_when_unknown,
            test_fn: Some(Arc::new(move |_req: &ValidatorRequest<'_>, _resp: &mut ValidatorResponse| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
            ..GenericConfig::default()
        });
        (validator, calls)
    }

    fn run(validator: &Generic, value: &AttrValue) -> Outcome {
        let config = Config::new(AttrValue::object_from([("a", value.clone())])).unwrap();
        let path = Path::root("a");
        let expr = path.expression();
        let mut resp = ValidatorResponse::default();
        validator.evaluate(&ValidatorRequest::new(&path, &expr, &config, value), &mut resp)
    }

    #[rstest]
    #[case::null_skipped(true, false, AttrValue::string_null(), Outcome::Skipped)]
    #[case::null_evaluated(false, true, AttrValue::string_null(), Outcome::Evaluated)]
    #[case::unknown_skipped(false, true, AttrValue::string_unknown(), Outcome::Skipped)]
    #[case::unknown_evaluated(true, false, AttrValue::string_unknown(), Outcome::Evaluated)]
    #[case::empty_never_skipped(true, true, AttrValue::string_value(""), Outcome::Evaluated)]
    #[case::valued(true, true, AttrValue::string_value("x"), Outcome::Evaluated)]
    fn skip_policy(
        #[case] skip_null: bool,
        #[case] skip_unknown: bool,
        #[case] value: AttrValue,
        #[case] expected: Outcome,
    ) {
        let (validator, calls) = counting(skip_null, skip_unknown);
        assert_eq!(run(&validator, &value), expected);
        let ran = usize::from(expected == Outcome::Evaluated);
        assert_eq!(calls.load(Ordering::SeqCst), ran);
    }

    #[test]
    #[should_panic(expected = "requires a test function")]
    fn missing_test_fn_panics() {
        let _ = Generic::new(GenericConfig::default());
    }

    struct Fixed;

    impl Describer for Fixed {
        fn description(&self) -> String {
            "from describer".into()
        }
    }

    #[test]
    fn describer_takes_precedence() {
        let (mut validator, _) = counting(false, false);
        validator.description = "static".into();
        assert_eq!(validator.description(), "static");
        assert_eq!(validator.markdown_description(), "static");

        validator.describer = Some(Arc::new(Fixed));
        assert_eq!(validator.description(), "from describer");
        assert_eq!(validator.markdown_description(), "from describer");
    }

    #[test]
    fn validate_all_keeps_order() {
        let flag = |summary: &'static str| {
            Generic::new(GenericConfig {
                test_fn: Some(Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
                    resp.diagnostics.add_attribute_error(req.path.clone(), summary, "");
                })),
                ..GenericConfig::default()
            })
        };
        let (first, second) = (flag("first"), flag("second"));

        let value = AttrValue::list_null(AttrType::String);
        let config = Config::new(AttrValue::object_from([("a", value.clone())])).unwrap();
        let path = Path::root("a");
        let expr = path.expression();
        let diags = validate_all(
            &[&first, &second],
            &ValidatorRequest::new(&path, &expr, &config, &value),
        );
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_ref()).collect();
        assert_eq!(summaries, ["first", "second"]);
    }
}
