// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Scope, Translator};
use crate::error::TranslateError;
use crate::plan::Operand;
use crate::query::{self, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emptiness {
    Empty,
    NonEmpty,
}

/// Reads `size OP n` as an emptiness test.
fn emptiness(op: &str, n: f64) -> Option<Emptiness> {
    match op {
        "gt" if n == 0.0 => Some(Emptiness::NonEmpty),
        "ge" if n == 1.0 => Some(Emptiness::NonEmpty),
        "eq" | "le" if n == 0.0 => Some(Emptiness::Empty),
        "lt" if n == 1.0 => Some(Emptiness::Empty),
        _ => None,
    }
}

// `n OP size` is `size OP' n`.
fn mirror(op: &str) -> &str {
    match op {
        "lt" => "gt",
        "gt" => "lt",
        "le" => "ge",
        "ge" => "le",
        other => other,
    }
}

impl Translator<'_> {
    /// Rewrites `OP(size(x), n)` and `OP(n, size(x))` emptiness checks.
    ///
    /// Returns `None` when no operand is a `size(...)` expression.
    pub(super) fn try_size_comparison(
        &self,
        op: &str,
        operands: &[Operand],
    ) -> Result<Option<Query>, TranslateError> {
        let Some((position, size)) = operands.iter().enumerate().find_map(|(idx, o)| match o {
            Operand::Expression(expr) if expr.operator == "size" => Some((idx, expr)),
            _ => None,
        }) else {
            return Ok(None);
        };

        let variable = match size.operands.as_slice() {
            [Operand::Variable(variable)] => variable,
            [other] => {
                return Err(TranslateError::UnsupportedSizeExpression(format!(
                    "size() operand must be a variable, got {}",
                    other.variant_name()
                )))
            }
            other => {
                return Err(TranslateError::UnsupportedSizeExpression(format!(
                    "size() requires exactly 1 operand, got {}",
                    other.len()
                )))
            }
        };
        let field = self.resolve_variable(variable, Scope::Root)?;

        let n = match operands {
            [_, _] => match &operands[1 - position] {
                Operand::Value(value) => value.as_number(),
                _ => None,
            },
            _ => None,
        };
        let op = if position == 0 { op } else { mirror(op) };

        match n.and_then(|n| emptiness(op, n)) {
            Some(Emptiness::NonEmpty) => Ok(Some(query::exists(&field))),
            Some(Emptiness::Empty) => Ok(Some(query::not_exists(&field))),
            None => Err(TranslateError::UnsupportedSizeComparison(match n {
                Some(n) => format!("size({variable}) {op} {n}"),
                None => format!("size({variable}) {op} with a non-numeric operand"),
            })),
        }
    }
}
