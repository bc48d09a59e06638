use serde_json::Value as Json;

use crate::error::{PathError, ValueError};
use crate::path::{Path, PathStep};
use crate::types::AttrType;
use crate::value::AttrValue;

/// Snapshot of a full configuration, rooted at an object value.
///
/// Validators receive the snapshot alongside the value they validate so they
/// can look up sibling attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    raw: AttrValue,
}

impl Config {
    /// Wrap an object value.
    pub fn new(raw: AttrValue) -> Result<Self, PathError> {
        match raw {
            AttrValue::Object { .. } => Ok(Self { raw }),
            other => Err(PathError::RootNotObject {
                found: other.attr_type(),
            }),
        }
    }

    /// Decode a JSON document against an object schema.
    pub fn from_json(schema: &AttrType, json: &Json) -> Result<Self, ConfigDecodeError> {
        let raw = AttrValue::from_json(schema, json)?;
        Ok(Self::new(raw)?)
    }

    pub fn raw(&self) -> &AttrValue {
        &self.raw
    }

    /// Look up the value at `path`.
    ///
    /// When the walk meets an unknown or null intermediate value, that
    /// intermediate is returned: nothing below an unvalued parent can be
    /// valued.
    pub fn get_attribute(&self, path: &Path) -> Result<AttrValue, PathError> {
        if path.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let mut current = &self.raw;
        for step in path.steps() {
            if !current.is_known() {
                return Ok(current.clone());
            }
            let next = match (step, current) {
                (PathStep::AttributeName(name), AttrValue::Object { .. })
                | (PathStep::ElementKeyString(name), AttrValue::Map { .. }) => {
                    current.entries().and_then(|entries| entries.get(name))
                }
                (PathStep::ElementKeyInt(index), AttrValue::List { .. } | AttrValue::Set { .. }) => {
                    usize::try_from(*index)
                        .ok()
                        .and_then(|i| current.elements().and_then(|elements| elements.get(i)))
                }
                _ => {
                    return Err(PathError::StepMismatch {
                        step: step.to_string(),
                        found: current.attr_type(),
                    });
                }
            };
            current = next.ok_or_else(|| PathError::NotFound {
                path: path.to_string(),
            })?;
        }
        Ok(current.clone())
    }
}

/// Errors from [`Config::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigDecodeError {
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Path(#[from] PathError),
}
