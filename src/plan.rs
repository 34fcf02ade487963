// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Verdict class of a plan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    #[default]
    #[serde(rename = "KIND_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "KIND_ALWAYS_ALLOWED")]
    AlwaysAllowed,
    #[serde(rename = "KIND_ALWAYS_DENIED")]
    AlwaysDenied,
    #[serde(rename = "KIND_CONDITIONAL")]
    Conditional,
}

/// A node of the condition tree.
///
/// Serialized the way the PDP emits it: `{"variable": "..."}`,
/// `{"value": ...}` or `{"expression": {"operator": ..., "operands": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operand {
    Value(Value),
    Variable(String),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub operator: String,
    #[serde(default)]
    pub operands: Vec<Operand>,
}

impl Operand {
    pub fn expr(operator: &str, operands: Vec<Operand>) -> Operand {
        Operand::Expression(Expression {
            operator: operator.to_string(),
            operands,
        })
    }

    pub fn var(name: &str) -> Operand {
        Operand::Variable(name.to_string())
    }

    pub fn value<V: Into<Value>>(value: V) -> Operand {
        Operand::Value(value.into())
    }

    /// Short name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Operand::Value(_) => "value",
            Operand::Variable(_) => "variable",
            Operand::Expression(_) => "expression",
        }
    }
}

/// The `filter` part of a plan response.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResourcesFilter {
    #[serde(default)]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Operand>,
}

impl PlanResourcesFilter {
    pub fn always_allowed() -> Self {
        Self {
            kind: Kind::AlwaysAllowed,
            condition: None,
        }
    }

    pub fn always_denied() -> Self {
        Self {
            kind: Kind::AlwaysDenied,
            condition: None,
        }
    }

    pub fn conditional(condition: Operand) -> Self {
        Self {
            kind: Kind::Conditional,
            condition: Some(condition),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResourcesMeta {
    #[serde(default)]
    pub filter_debug: String,
    #[serde(default)]
    pub matched_scope: String,
}

/// A plan response as returned by the PDP.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResourcesResponse {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub resource_kind: String,
    #[serde(default)]
    pub policy_version: String,
    #[serde(default)]
    pub filter: PlanResourcesFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PlanResourcesMeta>,
}

impl PlanResourcesResponse {
    pub fn new(filter: PlanResourcesFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Higher level view of a plan response.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResourcesResult {
    response: PlanResourcesResponse,
}

impl PlanResourcesResult {
    pub fn new(response: PlanResourcesResponse) -> Self {
        Self { response }
    }

    pub fn is_always_allowed(&self) -> bool {
        self.response.filter.kind == Kind::AlwaysAllowed
    }

    pub fn is_always_denied(&self) -> bool {
        self.response.filter.kind == Kind::AlwaysDenied
    }

    pub fn is_conditional(&self) -> bool {
        self.response.filter.kind == Kind::Conditional
    }

    pub fn condition(&self) -> Option<&Operand> {
        self.response.filter.condition.as_ref()
    }

    pub fn request_id(&self) -> &str {
        &self.response.request_id
    }

    pub fn action(&self) -> &str {
        &self.response.action
    }

    pub fn resource_kind(&self) -> &str {
        &self.response.resource_kind
    }

    pub fn response(&self) -> &PlanResourcesResponse {
        &self.response
    }
}

impl From<PlanResourcesResponse> for PlanResourcesResult {
    fn from(response: PlanResourcesResponse) -> Self {
        Self::new(response)
    }
}

/// Anything the translator can classify and translate.
pub trait QueryPlan {
    fn kind(&self) -> Kind;
    fn condition(&self) -> Option<&Operand>;

    /// Human readable rendering of the condition, if the PDP supplied one.
    fn filter_debug(&self) -> Option<&str> {
        None
    }
}

impl QueryPlan for PlanResourcesFilter {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn condition(&self) -> Option<&Operand> {
        self.condition.as_ref()
    }
}

impl QueryPlan for PlanResourcesResponse {
    fn kind(&self) -> Kind {
        self.filter.kind
    }

    fn condition(&self) -> Option<&Operand> {
        self.filter.condition.as_ref()
    }

    fn filter_debug(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .map(|m| m.filter_debug.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl QueryPlan for PlanResourcesResult {
    fn kind(&self) -> Kind {
        self.response.kind()
    }

    fn condition(&self) -> Option<&Operand> {
        self.response.condition()
    }

    fn filter_debug(&self) -> Option<&str> {
        self.response.filter_debug()
    }
}
