//! # attrval-core
//!
//! Host-side data model for attribute validation.
//!
//! ## Key Components
//!
//! - **Values**: [`AttrValue`] and [`Tristate`], typed values that may be unknown, null or known
//! - **Types**: [`AttrType`], the static type every value carries, valued or not
//! - **Paths**: [`Path`] and [`PathExpression`] for addressing values inside a configuration
//! - **Diagnostics**: [`Diagnostic`] and [`Diagnostics`], the findings validators report
//! - **Configuration**: [`Config`], a snapshot used to resolve sibling attributes
//!
//! ## Usage
//!
//! ```rust
//! use attrval_core::{AttrType, AttrValue, Config, Path};
//! use serde_json::json;
//!
//! let schema = AttrType::object([("name", AttrType::String), ("port", AttrType::Int64)]);
//! let config = Config::from_json(&schema, &json!({ "name": "web" })).unwrap();
//!
//! assert_eq!(config.get_attribute(&Path::root("name")).unwrap(), AttrValue::string_value("web"));
//! assert!(config.get_attribute(&Path::root("port")).unwrap().is_null());
//! ```

pub mod config;
pub mod diag;
pub mod error;
pub mod path;
pub mod types;
pub mod value;

pub use config::{Config, ConfigDecodeError};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{PathError, ValueError};
pub use path::{ExpressionStep, Path, PathExpression, PathStep, format_paths};
pub use types::AttrType;
pub use value::{AttrValue, Tristate};

pub use rust_decimal::Decimal;
