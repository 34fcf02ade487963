// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::operators::OperatorFcn;
use crate::query::{self, Query};

use std::collections::HashMap;

use serde_json::{json, Value as JsonValue};

pub fn register(m: &mut HashMap<&'static str, OperatorFcn>) {
    m.insert("contains", contains);
    m.insert("startsWith", starts_with);
    m.insert("endsWith", ends_with);
}

/// Escapes the wildcard metacharacters of the search engine's wildcard query.
///
/// Backslash must go first so that escapes added for `*` and `?` are not
/// themselves escaped again.
pub fn escape_wildcard(value: &JsonValue) -> String {
    let text = match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.replace('\\', "\\\\")
        .replace('*', "\\*")
        .replace('?', "\\?")
}

fn wildcard(field: &str, pattern: String) -> Query {
    query::object(json!({ "wildcard": { field: { "value": pattern } } }))
}

fn contains(field: &str, value: &JsonValue) -> Query {
    wildcard(field, format!("*{}*", escape_wildcard(value)))
}

// Prefix queries have no metacharacters.
fn starts_with(field: &str, value: &JsonValue) -> Query {
    query::object(json!({ "prefix": { field: { "value": value } } }))
}

fn ends_with(field: &str, value: &JsonValue) -> Query {
    wildcard(field, format!("*{}", escape_wildcard(value)))
}
