use std::sync::Arc;

use crate::coerce::Dynamic;
use crate::compare::{CompareOp, ComparisonRegistry, printable};
use crate::diagnostic::add_comparison_error_diagnostic;
use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};

/// Test function running `op` against `target` through `registry`.
pub fn compare_test(
    registry: Arc<ComparisonRegistry>,
    op: CompareOp,
    target: Dynamic,
    meta: Vec<Dynamic>,
) -> TestFn {
    Arc::new(move |req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        if let Err(err) = registry.compare_attr_values(req.config_value, op, &target, &meta) {
            add_comparison_error_diagnostic(op, &target, req, resp, &err);
        }
    })
}

/// Validator asserting `value op target`. Null and unknown values are
/// skipped.
///
/// The registry is consulted on every evaluation, so strategies registered
/// after the validator is built still apply.
pub fn compare(registry: &Arc<ComparisonRegistry>, op: CompareOp, target: impl Into<Dynamic>) -> Generic {
    compare_with_meta(registry, op, target, Vec::new())
}

/// [`compare`] with metadata forwarded to the strategy.
pub fn compare_with_meta(
    registry: &Arc<ComparisonRegistry>,
    op: CompareOp,
    target: impl Into<Dynamic>,
    meta: Vec<Dynamic>,
) -> Generic {
    let target = target.into();
    let description = format!("Asserts an attribute is \"{op}\" to {}", printable(&target));
    Generic::new(GenericConfig {
        markdown_description: description.clone(),
        description,
        test_fn: Some(compare_test(Arc::clone(registry), op, target, meta)),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
}

/// [`compare`] ignoring letter case. Applies to string and string-list
/// targets.
pub fn compare_case_insensitive(
    registry: &Arc<ComparisonRegistry>,
    op: CompareOp,
    target: impl Into<Dynamic>,
) -> Generic {
    compare_with_meta(registry, op, target, vec![Dynamic::Bool(true)])
}
