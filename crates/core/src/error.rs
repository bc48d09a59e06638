use crate::types::AttrType;

/// Errors from constructing or decoding an [`AttrValue`](crate::AttrValue).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// A collection element does not have the declared element type.
    #[error("element {index} has type {found}, expected {expected}")]
    ElementTypeMismatch {
        index: usize,
        expected: AttrType,
        found: AttrType,
    },

    /// A map entry does not have the declared element type.
    #[error("entry {key:?} has type {found}, expected {expected}")]
    EntryTypeMismatch {
        key: String,
        expected: AttrType,
        found: AttrType,
    },

    /// An object attribute was declared but not supplied.
    #[error("object attribute {name:?} is missing")]
    MissingAttribute { name: String },

    /// An object attribute was supplied but not declared.
    #[error("object attribute {name:?} is not declared")]
    UndeclaredAttribute { name: String },

    /// An object attribute does not have its declared type.
    #[error("object attribute {name:?} has type {found}, expected {expected}")]
    AttributeTypeMismatch {
        name: String,
        expected: AttrType,
        found: AttrType,
    },

    /// A JSON document does not fit the requested type.
    #[error("cannot decode JSON {found} as {expected}")]
    JsonMismatch { expected: AttrType, found: &'static str },

    /// A JSON number cannot be represented by the requested numeric type.
    #[error("JSON number {literal} does not fit {expected}")]
    JsonNumber { expected: AttrType, literal: String },
}

/// Errors from resolving a [`Path`](crate::Path) against a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PathError {
    /// The configuration root must be an object.
    #[error("configuration root must be an object, got {found}")]
    RootNotObject { found: AttrType },

    /// The path has no steps.
    #[error("path is empty")]
    EmptyPath,

    /// No value exists at the path.
    #[error("no value at path {path}")]
    NotFound { path: String },

    /// A step does not apply to the value it is stepping into.
    #[error("step {step} cannot be applied to a value of type {found}")]
    StepMismatch { step: String, found: AttrType },
}
