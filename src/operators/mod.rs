// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod collections;
pub mod comparison;
pub mod strings;

use crate::query::Query;

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use serde_json::Value as JsonValue;

/// Renders an atomic `(field, value)` clause into a query fragment.
///
/// Closures with the matching signature implement this trait, so overrides
/// are usually written inline:
///
/// ```ignore
/// let mut overrides = OperatorOverrides::new();
/// overrides.insert(
///     "eq".to_string(),
///     Box::new(|field: &str, value: &JsonValue| {
///         let mut clause = Query::new();
///         clause.insert("match".to_string(), json!({ field: value }));
///         clause
///     }),
/// );
/// ```
pub trait Renderer: Send + Sync {
    fn render(&self, field: &str, value: &JsonValue) -> Query;
}

impl<F> Renderer for F
where
    F: Fn(&str, &JsonValue) -> Query + Send + Sync,
{
    fn render(&self, field: &str, value: &JsonValue) -> Query {
        self(field, value)
    }
}

pub type OperatorFcn = fn(&str, &JsonValue) -> Query;

/// Caller supplied renderers, keyed by operator name.
pub type OperatorOverrides = BTreeMap<String, Box<dyn Renderer>>;

#[rustfmt::skip]
lazy_static! {
    pub static ref DEFAULT_OPERATORS: HashMap<&'static str, OperatorFcn> = {
	let mut m : HashMap<&'static str, OperatorFcn>  = HashMap::new();

	comparison::register(&mut m);
	strings::register(&mut m);
	collections::register(&mut m);

	m
    };
}

/// Resolves `op` to the caller's override, falling back to the default.
pub fn lookup<'a>(overrides: Option<&'a OperatorOverrides>, op: &str) -> Option<&'a dyn Renderer> {
    if let Some(renderer) = overrides.and_then(|o| o.get(op)) {
        return Some(renderer.as_ref());
    }
    DEFAULT_OPERATORS.get(op).map(|f| f as &dyn Renderer)
}

pub fn is_default_operator(op: &str) -> bool {
    DEFAULT_OPERATORS.contains_key(op)
}
