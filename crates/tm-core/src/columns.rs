//! Column-index configuration and resolution
//!
//! The host's column-selector UI produces a `{field: {index: n}}` mapping;
//! this module turns that into typed column indices. Required-vs-optional
//! is an explicit parameter, and the absence of an optional binding is a
//! value rather than an error path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// A single field binding as supplied by the host config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    /// Zero-based column position in the table rows.
    pub index: usize,
}

/// The host-supplied column configuration: field name to binding.
///
/// Field order is preserved so the column picker lists fields the way the
/// host declared them. Unset fields are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(flatten)]
    fields: IndexMap<String, ColumnBinding>,
}

impl ColumnConfig {
    /// Empty configuration with no fields bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret a raw host config value.
    ///
    /// Only entries shaped like `{"index": n}` become bindings; anything
    /// else in the object is ignored, matching the tolerance the host
    /// expects from its plugins.
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::new();
        if let Some(object) = value.as_object() {
            for (field, entry) in object {
                if let Some(index) = entry.get("index").and_then(Value::as_u64) {
                    config.bind(field, index as usize);
                }
            }
        }
        config
    }

    /// Bind `field` to a column position.
    pub fn bind(&mut self, field: &str, index: usize) {
        self.fields.insert(field.to_string(), ColumnBinding { index });
    }

    /// Remove the binding for `field`, if any.
    pub fn unbind(&mut self, field: &str) {
        self.fields.shift_remove(field);
    }

    /// Current binding for `field`.
    pub fn get(&self, field: &str) -> Option<ColumnBinding> {
        self.fields.get(field).copied()
    }
}

/// Where a field's cells live in the row, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnIndex {
    /// Field is bound to a column position.
    Bound(usize),
    /// Optional field left unset; reads yield nothing.
    Unbound,
}

impl ColumnIndex {
    /// Read this field's cell out of a row.
    pub fn get<'a>(&self, row: &'a [Value]) -> Option<&'a Value> {
        match self {
            ColumnIndex::Bound(index) => row.get(*index),
            ColumnIndex::Unbound => None,
        }
    }

    /// Read this field's cell as a string, when it holds one.
    pub fn str_of<'a>(&self, row: &'a [Value]) -> Option<&'a str> {
        self.get(row).and_then(Value::as_str)
    }

    /// Whether the field is bound to a column.
    pub fn is_bound(&self) -> bool {
        matches!(self, ColumnIndex::Bound(_))
    }
}

/// Whether a field must be bound for rendering to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// Resolve one field against the host configuration.
///
/// A missing binding for a required field is a configuration error naming
/// the field; a missing optional binding resolves to [`ColumnIndex::Unbound`].
pub fn resolve_column(
    config: &ColumnConfig,
    field: &str,
    requirement: Requirement,
) -> Result<ColumnIndex, ConfigError> {
    match (config.get(field), requirement) {
        (Some(binding), _) => Ok(ColumnIndex::Bound(binding.index)),
        (None, Requirement::Optional) => Ok(ColumnIndex::Unbound),
        (None, Requirement::Required) => Err(ConfigError::MissingColumn(field.to_string())),
    }
}
