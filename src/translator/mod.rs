// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod collection;
mod leaf;
mod size;

use crate::error::TranslateError;
use crate::operators::{self, OperatorOverrides};
use crate::plan::{Expression, Kind, Operand, QueryPlan};
use crate::query::{self, PlanQuery, Query};

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use serde_json::Value as JsonValue;

/// Maps plan attribute names (`request.resource.attr.x`) to index field paths.
pub type FieldMap = BTreeMap<String, String>;

/// Index field paths mapped as nested-document collections.
pub type NestedPaths = BTreeSet<String>;

/// Translates plans into search queries using a borrowed configuration.
///
/// A translator holds no state of its own; it can be shared freely and used
/// from several threads at once.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    field_map: &'a FieldMap,
    overrides: Option<&'a OperatorOverrides>,
    nested_paths: Option<&'a NestedPaths>,
}

/// Where variables are resolved during traversal.
#[derive(Debug, Clone, Copy)]
enum Scope<'s> {
    Root,
    Lambda(LambdaScope<'s>),
}

/// A collection lambda: `x.suffix` resolves to `nested_path.suffix`.
#[derive(Debug, Clone, Copy)]
struct LambdaScope<'s> {
    nested_path: &'s str,
    variable: &'s str,
}

impl LambdaScope<'_> {
    fn resolve(&self, name: &str) -> Result<String, TranslateError> {
        match name
            .strip_prefix(self.variable)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            Some(suffix) if !suffix.is_empty() => Ok(format!("{}.{suffix}", self.nested_path)),
            _ => Err(TranslateError::LambdaVariableMismatch(format!(
                "variable '{name}' does not start with lambda variable '{}.'",
                self.variable
            ))),
        }
    }
}

impl<'a> Translator<'a> {
    pub fn new(field_map: &'a FieldMap) -> Self {
        Self {
            field_map,
            overrides: None,
            nested_paths: None,
        }
    }

    pub fn with_overrides(mut self, overrides: &'a OperatorOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_nested_paths(mut self, nested_paths: &'a NestedPaths) -> Self {
        self.nested_paths = Some(nested_paths);
        self
    }

    /// Classifies the plan and, for conditional plans, translates its
    /// condition into a query.
    pub fn translate<P: QueryPlan + ?Sized>(&self, plan: &P) -> Result<PlanQuery, TranslateError> {
        let kind = plan.kind();
        debug!("translating plan of kind {kind:?}");
        if let Some(filter) = plan.filter_debug() {
            debug!("plan filter: {filter}");
        }

        match kind {
            Kind::AlwaysAllowed => Ok(PlanQuery::AlwaysAllowed),
            Kind::AlwaysDenied => Ok(PlanQuery::AlwaysDenied),
            Kind::Conditional => {
                let condition = plan.condition().ok_or_else(|| {
                    TranslateError::MissingCondition("conditional plan has no condition".to_string())
                })?;
                let query = self.translate_operand(condition, Scope::Root)?;
                Ok(PlanQuery::Conditional { query })
            }
            Kind::Unspecified => Err(TranslateError::UnsupportedPlanKind(
                "KIND_UNSPECIFIED".to_string(),
            )),
        }
    }

    fn translate_operand(&self, operand: &Operand, scope: Scope) -> Result<Query, TranslateError> {
        match operand {
            Operand::Expression(expr) => self.translate_expression(expr, scope),
            // A bare variable is a truthy test on a boolean attribute.
            Operand::Variable(name) => {
                let field = self.resolve_variable(name, scope)?;
                self.render("eq", &field, &JsonValue::Bool(true))
            }
            Operand::Value(value) => Err(TranslateError::UnexpectedOperand(format!(
                "value {value} cannot be used as a condition"
            ))),
        }
    }

    fn translate_all(&self, operands: &[Operand], scope: Scope) -> Result<Vec<Query>, TranslateError> {
        operands
            .iter()
            .map(|operand| self.translate_operand(operand, scope))
            .collect()
    }

    fn translate_expression(&self, expr: &Expression, scope: Scope) -> Result<Query, TranslateError> {
        let op = expr.operator.as_str();
        let operands = expr.operands.as_slice();
        trace!("translating {op} with {} operands", operands.len());

        match (op, scope) {
            ("and", _) => Ok(query::must(self.translate_all(operands, scope)?)),
            ("or", _) => Ok(query::should(self.translate_all(operands, scope)?)),
            ("not", _) => Ok(query::must_not(self.translate_all(operands, scope)?)),

            ("exists" | "all" | "except", Scope::Root) => self.translate_collection(op, operands),
            ("exists" | "all" | "except", Scope::Lambda(_)) => Err(TranslateError::UnexpectedOperand(
                format!("collection operator {op} is not supported inside a lambda"),
            )),

            ("hasIntersection", Scope::Root) => self.translate_has_intersection(operands),

            ("size", _) => Err(TranslateError::UnsupportedSizeExpression(
                "size() must be compared with a number".to_string(),
            )),

            (_, Scope::Root) => match self.try_size_comparison(op, operands)? {
                Some(query) => Ok(query),
                None => self.translate_leaf(op, operands, scope),
            },
            (_, Scope::Lambda(_)) => self.translate_leaf(op, operands, scope),
        }
    }

    fn resolve_variable(&self, name: &str, scope: Scope) -> Result<String, TranslateError> {
        match scope {
            Scope::Root => self.resolve_attribute(name),
            Scope::Lambda(lambda) => lambda.resolve(name),
        }
    }

    fn resolve_attribute(&self, name: &str) -> Result<String, TranslateError> {
        self.field_map
            .get(name)
            .cloned()
            .ok_or_else(|| TranslateError::UnknownAttribute(name.to_string()))
    }

    fn is_nested_path(&self, field: &str) -> bool {
        self.nested_paths.is_some_and(|paths| paths.contains(field))
    }

    fn render(&self, op: &str, field: &str, value: &JsonValue) -> Result<Query, TranslateError> {
        match operators::lookup(self.overrides, op) {
            Some(renderer) => Ok(renderer.render(field, value)),
            None => Err(TranslateError::UnknownOperator(op.to_string())),
        }
    }
}

/// Translates a plan with the default operator renderers and no nested paths.
pub fn translate<P: QueryPlan + ?Sized>(
    plan: &P,
    field_map: &FieldMap,
) -> Result<PlanQuery, TranslateError> {
    Translator::new(field_map).translate(plan)
}

pub fn translate_with_overrides<P: QueryPlan + ?Sized>(
    plan: &P,
    field_map: &FieldMap,
    overrides: &OperatorOverrides,
) -> Result<PlanQuery, TranslateError> {
    Translator::new(field_map)
        .with_overrides(overrides)
        .translate(plan)
}

pub fn translate_with_nested_paths<P: QueryPlan + ?Sized>(
    plan: &P,
    field_map: &FieldMap,
    nested_paths: &NestedPaths,
) -> Result<PlanQuery, TranslateError> {
    Translator::new(field_map)
        .with_nested_paths(nested_paths)
        .translate(plan)
}

pub fn translate_with<P: QueryPlan + ?Sized>(
    plan: &P,
    field_map: &FieldMap,
    overrides: &OperatorOverrides,
    nested_paths: &NestedPaths,
) -> Result<PlanQuery, TranslateError> {
    Translator::new(field_map)
        .with_overrides(overrides)
        .with_nested_paths(nested_paths)
        .translate(plan)
}
