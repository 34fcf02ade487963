// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

/// A search DSL query fragment.
pub type Query = serde_json::Map<String, JsonValue>;

/// Outcome of translating a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanQuery {
    AlwaysAllowed,
    AlwaysDenied,
    Conditional { query: Query },
}

impl PlanQuery {
    pub fn query(&self) -> Option<&Query> {
        match self {
            PlanQuery::Conditional { query } => Some(query),
            PlanQuery::AlwaysAllowed | PlanQuery::AlwaysDenied => None,
        }
    }

    pub fn into_query(self) -> Option<Query> {
        match self {
            PlanQuery::Conditional { query } => Some(query),
            PlanQuery::AlwaysAllowed | PlanQuery::AlwaysDenied => None,
        }
    }

    /// Builds a complete search request body.
    ///
    /// A conditional query is placed in filter context so it restricts hits
    /// without contributing to scoring; `user_query` (if any) is scored in
    /// `must`. An always-denied plan matches nothing regardless of the user
    /// query.
    pub fn search_body(&self, user_query: Option<Query>) -> Query {
        let query = match self {
            PlanQuery::AlwaysAllowed => match user_query {
                Some(user_query) => JsonValue::Object(user_query),
                None => json!({"match_all": {}}),
            },
            PlanQuery::AlwaysDenied => json!({"match_none": {}}),
            PlanQuery::Conditional { query } => {
                let mut clauses = Query::new();
                if let Some(user_query) = user_query {
                    clauses.insert("must".to_string(), json!([user_query]));
                }
                clauses.insert("filter".to_string(), json!([query]));
                json!({ "bool": clauses })
            }
        };

        object(json!({ "query": query }))
    }
}

// Unwraps a `json!` object literal. Only ever called with object literals.
pub(crate) fn object(value: JsonValue) -> Query {
    match value {
        JsonValue::Object(map) => map,
        _ => Query::new(),
    }
}

pub(crate) fn term(field: &str, value: JsonValue) -> Query {
    object(json!({ "term": { field: { "value": value } } }))
}

pub(crate) fn terms(field: &str, values: JsonValue) -> Query {
    object(json!({ "terms": { field: values } }))
}

pub(crate) fn range(field: &str, op: &str, value: JsonValue) -> Query {
    object(json!({ "range": { field: { op: value } } }))
}

pub(crate) fn exists(field: &str) -> Query {
    object(json!({ "exists": { "field": field } }))
}

pub(crate) fn not_exists(field: &str) -> Query {
    must_not(vec![exists(field)])
}

pub(crate) fn must(clauses: Vec<Query>) -> Query {
    object(json!({ "bool": { "must": clauses } }))
}

pub(crate) fn should(clauses: Vec<Query>) -> Query {
    object(json!({ "bool": { "should": clauses, "minimum_should_match": 1 } }))
}

pub(crate) fn must_not(clauses: Vec<Query>) -> Query {
    object(json!({ "bool": { "must_not": clauses } }))
}

pub(crate) fn nested(path: &str, query: Query) -> Query {
    object(json!({ "nested": { "path": path, "query": query } }))
}

/// Wraps a non-list value in a singleton list.
pub(crate) fn as_list(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(_) => value.clone(),
        _ => JsonValue::Array(vec![value.clone()]),
    }
}
