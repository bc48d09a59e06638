//! # attrval-validator
//!
//! Validation and comparison of tri-state attribute values.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrval_core::{AttrValue, Config, Path};
//! use attrval_validator::prelude::*;
//!
//! let registry = Arc::new(ComparisonRegistry::new());
//! let replicas = compare(&registry, CompareOp::GreaterThanOrEqualTo, 1_i64);
//!
//! let config = Config::new(AttrValue::object_from([("replicas", AttrValue::int64_value(0))])).unwrap();
//! let path = Path::root("replicas");
//! let expr = path.expression();
//! let value = config.get_attribute(&path).unwrap();
//!
//! let mut resp = ValidatorResponse::default();
//! replicas.validate(&ValidatorRequest::new(&path, &expr, &config, &value), &mut resp);
//! assert_eq!(resp.diagnostics.as_slice()[0].summary, "Value is below threshold");
//! ```
//!
//! ## Layers
//!
//! - [`state`]: classifies a value as unknown, null, empty or valued.
//! - [`conv`] and [`coerce`]: bring attribute values and loosely-typed
//!   targets into comparable Rust types.
//! - [`compare`]: the [`ComparisonRegistry`](compare::ComparisonRegistry)
//!   and its default strategies.
//! - [`generic`]: the [`Generic`](generic::Generic) validator wrapper with
//!   its null and unknown skip policy.
//! - [`validators`]: ready-made validators built on `Generic`.
//! - [`config`]: validators described in JSON.

// ComparisonError carries the failing conversion inline; boxing it would
// only move the allocation to every failed comparison.
#![allow(clippy::result_large_err)]

pub mod coerce;
pub mod compare;
pub mod config;
pub mod conv;
pub mod diagnostic;
pub mod error;
pub mod generic;
pub mod prelude;
pub mod state;
pub mod validators;
