// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::operators::OperatorFcn;
use crate::query::{self, Query};

use std::collections::HashMap;

use serde_json::Value as JsonValue;

pub fn register(m: &mut HashMap<&'static str, OperatorFcn>) {
    m.insert("in", is_in);
    m.insert("hasIntersection", has_intersection);
    m.insert("isSet", is_set);
}

fn is_in(field: &str, value: &JsonValue) -> Query {
    query::terms(field, query::as_list(value))
}

// Flat form only; the nested `map(...)` projection is rewritten by the translator.
fn has_intersection(field: &str, value: &JsonValue) -> Query {
    query::terms(field, query::as_list(value))
}

fn is_set(field: &str, value: &JsonValue) -> Query {
    match value {
        JsonValue::Bool(true) => query::exists(field),
        _ => query::not_exists(field),
    }
}
