// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod error;
mod mapping;
mod plan;
mod query;
mod translator;
mod value;

pub mod operators;

pub use error::TranslateError;
pub use mapping::Mapping;
pub use operators::{OperatorOverrides, Renderer};
pub use plan::{
    Expression, Kind, Operand, PlanResourcesFilter, PlanResourcesMeta, PlanResourcesResponse,
    PlanResourcesResult, QueryPlan,
};
pub use query::{PlanQuery, Query};
pub use translator::{
    translate, translate_with, translate_with_nested_paths, translate_with_overrides, FieldMap,
    NestedPaths, Translator,
};
pub use value::Value;
