// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Scope, Translator};
use crate::error::TranslateError;
use crate::plan::Operand;
use crate::query::{self, Query};

impl Translator<'_> {
    /// Renders `op(variable, value)` through the operator registry.
    ///
    /// A null (or absent) literal never reaches a renderer: equality with null
    /// becomes a missing-field test and inequality an existence test.
    pub(super) fn translate_leaf(
        &self,
        op: &str,
        operands: &[Operand],
        scope: Scope,
    ) -> Result<Query, TranslateError> {
        let mut variable = None;
        let mut literal = None;

        for operand in operands {
            match operand {
                Operand::Variable(name) => {
                    if variable.replace(name).is_some() {
                        return Err(TranslateError::UnexpectedOperand(format!(
                            "{op} has more than one variable operand"
                        )));
                    }
                }
                Operand::Value(value) => {
                    if literal.replace(value).is_some() {
                        return Err(TranslateError::UnexpectedOperand(format!(
                            "{op} has more than one value operand"
                        )));
                    }
                }
                Operand::Expression(expr) => {
                    return Err(TranslateError::UnexpectedOperand(format!(
                        "expression {} is not supported as an operand of {op}",
                        expr.operator
                    )))
                }
            }
        }

        let Some(variable) = variable else {
            return Err(TranslateError::MissingVariable(op.to_string()));
        };
        let field = self.resolve_variable(variable, scope)?;

        match literal {
            Some(value) if !value.is_null() => self.render(op, &field, &value.to_json()?),
            _ => null_comparison(op, &field),
        }
    }
}

fn null_comparison(op: &str, field: &str) -> Result<Query, TranslateError> {
    match op {
        "eq" => Ok(query::not_exists(field)),
        "ne" => Ok(query::exists(field)),
        _ => Err(TranslateError::NullOperatorMisuse(op.to_string())),
    }
}
