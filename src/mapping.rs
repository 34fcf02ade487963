// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::operators::OperatorOverrides;
use crate::translator::{FieldMap, NestedPaths, Translator};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Attribute-to-index mapping, loadable from configuration files.
///
/// ```json
/// {
///   "fieldMap": { "request.resource.attr.tags": "tags" },
///   "nestedPaths": ["tags"]
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    #[serde(default)]
    pub field_map: FieldMap,
    #[serde(default)]
    pub nested_paths: NestedPaths,
}

impl Mapping {
    pub fn new(field_map: FieldMap) -> Self {
        Self {
            field_map,
            nested_paths: NestedPaths::new(),
        }
    }

    pub fn with_nested_path(mut self, path: &str) -> Self {
        self.nested_paths.insert(path.to_string());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: Mapping = serde_json::from_str(json)?;
        mapping.validate()?;
        Ok(mapping)
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(c) => Self::from_json_str(c.as_str()),
            Err(e) => bail!("Failed to read {path}. {e}"),
        }
    }

    /// Nested paths live in the index's field space, so each one must be the
    /// target of some mapped attribute.
    pub fn validate(&self) -> Result<()> {
        for path in self.nested_paths.iter() {
            if !self.field_map.values().any(|field| field == path) {
                bail!("nested path '{path}' is not the target of any mapped attribute");
            }
        }
        Ok(())
    }

    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.field_map).with_nested_paths(&self.nested_paths)
    }

    pub fn translator_with_overrides<'a>(&'a self, overrides: &'a OperatorOverrides) -> Translator<'a> {
        self.translator().with_overrides(overrides)
    }
}
