//! Built-in validators
//!
//! Ready-made [`Generic`](crate::generic::Generic) validators for common
//! attribute checks.
//!
//! # Categories
//!
//! - **Presence**: [`required`]
//! - **String**: [`regexp_match`], [`regexp_not_match`], [`is_url`], [`is_duration_string`]
//! - **Length**: [`length`] for strings and collections
//! - **Comparison**: [`compare`] against a target through a [`ComparisonRegistry`](crate::compare::ComparisonRegistry)
//! - **Siblings**: [`mutually_exclusive_sibling`], [`mutually_inclusive_sibling`]
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrval_validator::prelude::*;
//!
//! let registry = Arc::new(ComparisonRegistry::new());
//! let port = compare(&registry, CompareOp::LessThanOrEqualTo, 65_535_i64);
//! let name = regexp_match("^[a-z][a-z0-9-]*$").unwrap();
//! let endpoint = is_url_with(Some("https"), None);
//! # let _ = (port, name, endpoint);
//! ```

pub mod compare;
pub mod duration;
pub mod length;
pub mod regexp;
pub mod required;
pub mod sibling;
pub mod url;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use compare::{compare, compare_case_insensitive, compare_test, compare_with_meta};
pub use duration::{DurationError, is_duration_string, is_duration_string_test, parse_duration};
pub use length::{UNBOUNDED, length, length_test};
pub use regexp::{regexp_match, regexp_match_test, regexp_not_match, regexp_not_match_test};
pub use required::{required, required_test};
pub use sibling::{
    mutually_exclusive_sibling, mutually_exclusive_sibling_test, mutually_inclusive_sibling,
    mutually_inclusive_sibling_test,
};
pub use self::url::{is_url, is_url_test, is_url_with};
