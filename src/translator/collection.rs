// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{LambdaScope, Scope, Translator};
use crate::error::TranslateError;
use crate::plan::{Expression, Operand};
use crate::query::{self, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectionOperator {
    Exists,
    All,
    Except,
}

impl CollectionOperator {
    fn from_name(op: &str) -> Option<Self> {
        match op {
            "exists" => Some(Self::Exists),
            "all" => Some(Self::All),
            "except" => Some(Self::Except),
            _ => None,
        }
    }
}

/// Splits `lambda(body, var)` into its body and bound variable name.
fn parse_lambda<'o>(op: &str, operand: &'o Operand) -> Result<(&'o Operand, &'o str), TranslateError> {
    let lambda = match operand {
        Operand::Expression(expr) if expr.operator == "lambda" => expr,
        Operand::Expression(expr) => {
            return Err(TranslateError::MalformedLambda(format!(
                "{op} second operand must be a lambda, got {}",
                expr.operator
            )))
        }
        other => {
            return Err(TranslateError::MalformedLambda(format!(
                "{op} second operand must be a lambda expression, got {}",
                other.variant_name()
            )))
        }
    };

    match lambda.operands.as_slice() {
        [body, Operand::Variable(variable)] => Ok((body, variable.as_str())),
        [_, other] => Err(TranslateError::MalformedLambda(format!(
            "lambda second operand must be a variable, got {}",
            other.variant_name()
        ))),
        operands => Err(TranslateError::MalformedLambda(format!(
            "lambda requires exactly 2 operands, got {}",
            operands.len()
        ))),
    }
}

impl Translator<'_> {
    /// Resolves the list operand of a collection operator to a nested path.
    fn resolve_nested_path(&self, op: &str, operand: &Operand) -> Result<String, TranslateError> {
        let name = match operand {
            Operand::Variable(name) => name,
            other => {
                return Err(TranslateError::UnexpectedOperand(format!(
                    "{op} first operand must be a variable, got {}",
                    other.variant_name()
                )))
            }
        };

        let field = self.resolve_attribute(name)?;
        if !self.is_nested_path(&field) {
            return Err(TranslateError::NotANestedPath(field));
        }
        Ok(field)
    }

    pub(super) fn translate_collection(
        &self,
        op: &str,
        operands: &[Operand],
    ) -> Result<Query, TranslateError> {
        let Some(collection_op) = CollectionOperator::from_name(op) else {
            return Err(TranslateError::UnknownOperator(op.to_string()));
        };

        let [list, lambda] = operands else {
            return Err(TranslateError::UnexpectedOperand(format!(
                "{op} requires exactly 2 operands, got {}",
                operands.len()
            )));
        };

        let path = self.resolve_nested_path(op, list)?;
        let (body, variable) = parse_lambda(op, lambda)?;
        let scope = Scope::Lambda(LambdaScope {
            nested_path: &path,
            variable,
        });
        let inner = self.translate_operand(body, scope)?;

        Ok(match collection_op {
            CollectionOperator::Exists => query::nested(&path, inner),
            CollectionOperator::Except => query::nested(&path, query::must_not(vec![inner])),
            // No element violates the predicate.
            CollectionOperator::All => query::must_not(vec![query::nested(
                &path,
                query::must_not(vec![inner]),
            )]),
        })
    }

    pub(super) fn translate_has_intersection(
        &self,
        operands: &[Operand],
    ) -> Result<Query, TranslateError> {
        let [first, second] = operands else {
            return Err(TranslateError::UnexpectedOperand(format!(
                "hasIntersection requires exactly 2 operands, got {}",
                operands.len()
            )));
        };

        match first {
            Operand::Expression(expr) if expr.operator == "map" => {
                self.translate_map_intersection(expr, second)
            }
            Operand::Variable(_) => self.translate_leaf("hasIntersection", operands, Scope::Root),
            other => Err(TranslateError::UnexpectedOperand(format!(
                "hasIntersection first operand must be a variable or a map projection, got {}",
                other.variant_name()
            ))),
        }
    }

    /// `hasIntersection(map(list, lambda(x.suffix, x)), values)`: some element
    /// of the nested collection has its `suffix` field in `values`.
    fn translate_map_intersection(
        &self,
        map: &Expression,
        values: &Operand,
    ) -> Result<Query, TranslateError> {
        let [list, lambda] = map.operands.as_slice() else {
            return Err(TranslateError::UnexpectedOperand(format!(
                "map requires exactly 2 operands, got {}",
                map.operands.len()
            )));
        };

        let path = self.resolve_nested_path("map", list)?;
        let (body, variable) = parse_lambda("map", lambda)?;
        let Operand::Variable(projection) = body else {
            return Err(TranslateError::UnexpectedOperand(format!(
                "map lambda body must be a simple variable projection, got {}",
                body.variant_name()
            )));
        };
        let nested_field = LambdaScope {
            nested_path: &path,
            variable,
        }
        .resolve(projection)?;

        let values = match values {
            Operand::Value(value) if value.is_null() => {
                return Err(TranslateError::NullOperatorMisuse("hasIntersection".to_string()))
            }
            Operand::Value(value) => query::as_list(&value.to_json()?),
            other => {
                return Err(TranslateError::UnexpectedOperand(format!(
                    "hasIntersection second operand must be a value list, got {}",
                    other.variant_name()
                )))
            }
        };

        Ok(query::nested(&path, query::terms(&nested_field, values)))
    }
}
