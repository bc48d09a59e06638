//! Required-value validator.
//!
//! Fails when the attribute is null or empty. Unknown values are skipped,
//! since they may still resolve to a value.

use std::sync::{Arc, LazyLock};

use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};
use crate::state::test_attribute_value_state;

static REQUIRED: LazyLock<Generic> = LazyLock::new(|| {
    Generic::new(GenericConfig {
        description: "Attribute must be valued".into(),
        markdown_description: "Attribute must be valued".into(),
        test_fn: Some(required_test()),
        skip_when_null: false,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
});

/// Test function behind [`required`].
pub fn required_test() -> TestFn {
    Arc::new(|req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        if test_attribute_value_state(req.config_value).is_ok() {
            return;
        }
        resp.diagnostics.add_attribute_error(
            req.path.clone(),
            "Attribute must be valued",
            "Attribute must have a value configured",
        );
    })
}

/// Validator failing on null or empty values.
///
/// Every call returns a handle to the same shared validator.
pub fn required() -> Generic {
    REQUIRED.clone()
}
