//! Diagnostics for failed comparisons.

use crate::coerce::Dynamic;
use crate::compare::{CompareOp, printable};
use crate::error::{ComparisonError, ComparisonErrorKind};
use crate::generic::{ValidatorRequest, ValidatorResponse};

/// Summary and detail verb for a failed comparison.
fn comparison_wording(op: CompareOp) -> (&'static str, &'static str) {
    match op {
        CompareOp::Equal => ("Attribute value does not match expected", "must equal"),
        CompareOp::NotEqual => ("Attribute value is not allowed", "must not equal"),
        CompareOp::LessThan => ("Value is above threshold", "must be less than"),
        CompareOp::LessThanOrEqualTo => ("Value is above threshold", "must be less than or equal to"),
        CompareOp::GreaterThan => ("Value is below threshold", "must be greater than"),
        CompareOp::GreaterThanOrEqualTo => {
            ("Value is below threshold", "must be greater than or equal to")
        }
        CompareOp::OneOf => ("Value is not within allowed list", "must be one of"),
        CompareOp::NotOneOf => ("Value is not within allowed list", "must not be one of"),
    }
}

/// Append the error diagnostic for a comparison that evaluated false.
///
/// The detail names the attribute value, the operator wording, the target
/// rendered with its type, and `err`.
pub fn add_comparison_failed_diagnostic(
    op: CompareOp,
    target: &Dynamic,
    req: &ValidatorRequest<'_>,
    resp: &mut ValidatorResponse,
    err: &ComparisonError,
) {
    let (summary, verb) = comparison_wording(op);
    resp.diagnostics.add_attribute_error(
        req.path.clone(),
        summary,
        format!(
            "Attribute value {} {verb} {}; err={err}",
            req.config_value,
            printable(target)
        ),
    );
}

/// Append the error diagnostic matching the class of `err`.
///
/// Comparison failures use [`add_comparison_failed_diagnostic`]; conversion
/// failures and every other class get their own fixed summaries.
pub fn add_comparison_error_diagnostic(
    op: CompareOp,
    target: &Dynamic,
    req: &ValidatorRequest<'_>,
    resp: &mut ValidatorResponse,
    err: &ComparisonError,
) {
    match err.kind() {
        ComparisonErrorKind::ComparisonFailed => {
            add_comparison_failed_diagnostic(op, target, req, resp, err);
        }
        ComparisonErrorKind::TypeConversionFailed => resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "Could not convert attribute to target type for comparison",
            format!(
                "Unable to convert attribute value of type {} for \"{op}\" comparison with {}: {err}",
                req.config_value.attr_type(),
                printable(target)
            ),
        ),
        _ => resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "Unexpected error during comparison",
            format!("Comparison \"{op}\" against {} failed: {err}", printable(target)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::state::StateError;
    use attrval_core::{AttrValue, Config, Path};
    use pretty_assertions::assert_eq;

    fn respond(op: CompareOp, target: &Dynamic, value: &AttrValue, err: &ComparisonError) -> ValidatorResponse {
        let config = Config::new(AttrValue::object_from([("count", value.clone())])).unwrap();
        let path = Path::root("count");
        let expr = path.expression();
        let mut resp = ValidatorResponse::default();
        add_comparison_error_diagnostic(
            op,
            target,
            &ValidatorRequest::new(&path, &expr, &config, value),
            &mut resp,
            err,
        );
        resp
    }

    #[test]
    fn failed_comparison_names_value_and_target() {
        let target = Dynamic::from(5_i64);
        let value = AttrValue::int64_value(4);
        let err = ComparisonError::comparison_failed(4_i64, CompareOp::GreaterThanOrEqualTo, 5_i64);
        let resp = respond(CompareOp::GreaterThanOrEqualTo, &target, &value, &err);

        let diag = &resp.diagnostics.as_slice()[0];
        assert_eq!(diag.summary, "Value is below threshold");
        assert_eq!(diag.path, Some(Path::root("count")));
        assert!(diag.detail.starts_with("Attribute value 4 must be greater than or equal to int64(5); err="));
    }

    #[test]
    fn every_operator_has_wording() {
        for op in CompareOp::ALL {
            let (summary, verb) = comparison_wording(op);
            assert!(!summary.is_empty());
            assert!(verb.starts_with("must"));
        }
    }

    #[test]
    fn conversion_failures_get_their_own_summary() {
        let err = ComparisonError::from(ConversionError::NotValued(StateError::ValueIsNull));
        let resp = respond(CompareOp::Equal, &Dynamic::from(1_i64), &AttrValue::int64_null(), &err);
        assert_eq!(
            resp.diagnostics.as_slice()[0].summary,
            "Could not convert attribute to target type for comparison"
        );
    }

    #[test]
    fn other_failures_are_unexpected() {
        let err = ComparisonError::no_strategy(CompareOp::LessThan, "bool");
        let resp = respond(CompareOp::LessThan, &Dynamic::from(true), &AttrValue::bool_value(true), &err);
        assert_eq!(
            resp.diagnostics.as_slice()[0].summary,
            "Unexpected error during comparison"
        );
        assert_eq!(resp.diagnostics.len(), 1);
    }
}
