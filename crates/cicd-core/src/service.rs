//! Host-owned service description
//!
//! The service description is the host's in-memory mapping of the whole
//! deployable unit. This crate reads its name, stage, and `custom` block, and
//! writes to it exactly once: merging a [`ResourceDocument`] into
//! `resources`.

use crate::resources::ResourceDocument;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Stage used when neither the caller nor the description names one
pub const DEFAULT_STAGE: &str = "dev";

static NULL: Value = Value::Null;

/// A mutable service description
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescription {
    inner: Value,
}

impl ServiceDescription {
    /// Wrap a parsed description; the top level must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidServiceDescription {
                message: "top level must be a mapping".to_string(),
            });
        }
        Ok(Self { inner: value })
    }

    /// Parse a YAML description
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Parse a JSON description
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Load a description from disk, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml" | "yaml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// The service name
    ///
    /// Accepts both `service: name` and `service: {name: name}`.
    pub fn service_name(&self) -> Result<&str> {
        let service = &self.inner["service"];
        service
            .as_str()
            .or_else(|| service.get("name").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .ok_or(Error::MissingServiceName)
    }

    /// The `custom` block, or `null` when absent
    pub fn custom(&self) -> &Value {
        self.inner.get("custom").unwrap_or(&NULL)
    }

    /// The `custom.cicd` option block, or `null` when absent
    pub fn cicd_options(&self) -> &Value {
        self.custom().get("cicd").unwrap_or(&NULL)
    }

    /// The stage being packaged
    ///
    /// Precedence: `explicit`, then `custom.stage`, then `provider.stage`,
    /// then [`DEFAULT_STAGE`].
    pub fn active_stage(&self, explicit: Option<&str>) -> String {
        explicit
            .or_else(|| self.custom().get("stage").and_then(Value::as_str))
            .or_else(|| {
                self.inner
                    .get("provider")
                    .and_then(|p| p.get("stage"))
                    .and_then(Value::as_str)
            })
            .unwrap_or(DEFAULT_STAGE)
            .to_string()
    }

    /// The `resources` block, if any
    pub fn resources(&self) -> Option<&Value> {
        self.inner.get("resources")
    }

    /// Merge a resource document into `resources`
    ///
    /// Resources the user already declared are kept; on a logical-name
    /// collision the generated definition wins. Returns the merged names.
    pub fn merge_resources(&mut self, document: &ResourceDocument) -> Result<Vec<String>> {
        let generated = document.to_value()?;
        let map = self
            .inner
            .as_object_mut()
            .ok_or_else(|| Error::InvalidServiceDescription {
                message: "top level must be a mapping".to_string(),
            })?;

        let slot = map
            .entry("resources")
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        deep_merge_value(slot, &generated);

        Ok(document
            .logical_names()
            .iter()
            .map(|name| name.to_string())
            .collect())
    }

    pub fn as_value(&self) -> &Value {
        &self.inner
    }

    pub fn into_value(self) -> Value {
        self.inner
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
