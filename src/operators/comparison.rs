// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::operators::OperatorFcn;
use crate::query::{self, Query};

use std::collections::HashMap;

use serde_json::Value as JsonValue;

pub fn register(m: &mut HashMap<&'static str, OperatorFcn>) {
    m.insert("eq", eq);
    m.insert("ne", ne);
    m.insert("lt", lt);
    m.insert("gt", gt);
    m.insert("le", le);
    m.insert("ge", ge);
}

fn eq(field: &str, value: &JsonValue) -> Query {
    query::term(field, value.clone())
}

fn ne(field: &str, value: &JsonValue) -> Query {
    query::must_not(vec![query::term(field, value.clone())])
}

fn lt(field: &str, value: &JsonValue) -> Query {
    query::range(field, "lt", value.clone())
}

fn gt(field: &str, value: &JsonValue) -> Query {
    query::range(field, "gt", value.clone())
}

fn le(field: &str, value: &JsonValue) -> Query {
    query::range(field, "lte", value.clone())
}

fn ge(field: &str, value: &JsonValue) -> Query {
    query::range(field, "gte", value.clone())
}
