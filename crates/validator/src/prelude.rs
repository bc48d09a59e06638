//! Prelude module for convenient imports.
//!
//! Provides a single `use attrval_validator::prelude::*;` import that brings
//! in the validator traits, the comparison registry and every built-in
//! validator constructor.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrval_validator::prelude::*;
//!
//! let registry = Arc::new(ComparisonRegistry::new());
//! let rules = [
//!     required(),
//!     length(1, 63),
//!     compare_case_insensitive(&registry, CompareOp::NotOneOf, vec!["admin", "root"]),
//! ];
//! assert!(rules.iter().all(|v| !v.description().is_empty()));
//! ```

// ============================================================================
// FOUNDATION: Wrapper, request/response, state
// ============================================================================

pub use crate::generic::{
    AttributeValidator, Describer, Generic, GenericConfig, Outcome, TestFn, ValidatorRequest,
    ValidatorResponse, validate_all,
};
pub use crate::state::{DefinednessState, StateError, classify_state, test_attribute_value_state};

// ============================================================================
// COMPARISON: Registry, operators, targets, errors
// ============================================================================

pub use crate::coerce::Dynamic;
pub use crate::compare::{CompareOp, ComparisonFn, ComparisonRegistry, printable};
pub use crate::error::{ComparisonError, ComparisonErrorKind, ConversionError};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

pub use crate::validators::{
    UNBOUNDED, compare, compare_case_insensitive, compare_with_meta, is_duration_string, is_url,
    is_url_with, length, mutually_exclusive_sibling, mutually_inclusive_sibling, regexp_match,
    regexp_not_match, required,
};

// ============================================================================
// CONFIG: Declarative validators
// ============================================================================

pub use crate::config::{CompiledRules, ConfigError, RuleSet, ValidatorSpec};
