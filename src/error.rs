// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Error type for plan translation.
///
/// Every variant carries a single human-readable message. Translation aborts
/// on the first error and never returns a partial query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Conditional plan without a condition operand
    #[error("Missing condition: {0}")]
    MissingCondition(String),
    /// Plan kind that cannot be classified
    #[error("Unsupported plan kind: {0}")]
    UnsupportedPlanKind(String),
    /// Variable not present in the field map
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
    /// Operator with neither a default nor an override renderer
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    /// Leaf expression without a variable operand
    #[error("Missing variable in expression: {0}")]
    MissingVariable(String),
    /// Operand variant not valid in its position
    #[error("Unexpected operand: {0}")]
    UnexpectedOperand(String),
    /// Null literal compared with an operator other than eq or ne
    #[error("Null values are only supported with eq and ne operators, got {0}")]
    NullOperatorMisuse(String),
    /// Collection operator applied to a field that is not a nested path
    #[error("Field '{0}' is not declared as a nested path. Collection operators require nested mappings.")]
    NotANestedPath(String),
    /// Lambda of the wrong shape
    #[error("Malformed lambda: {0}")]
    MalformedLambda(String),
    /// Variable inside a lambda not rooted at the lambda variable
    #[error("Lambda variable mismatch: {0}")]
    LambdaVariableMismatch(String),
    /// size() compared in something other than an emptiness check
    #[error("Unsupported size comparison: {0}. Only emptiness checks (size > 0, size == 0) are supported.")]
    UnsupportedSizeComparison(String),
    /// size() applied to something other than a plain variable
    #[error("Unsupported size() expression: {0}")]
    UnsupportedSizeExpression(String),
    /// Plan value that cannot be represented in a query
    #[error("Unsupported value kind: {0}")]
    UnsupportedValueKind(String),
}

impl TranslateError {
    /// Stable name of the error kind, independent of the message.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TranslateError::MissingCondition(_) => "MissingCondition",
            TranslateError::UnsupportedPlanKind(_) => "UnsupportedPlanKind",
            TranslateError::UnknownAttribute(_) => "UnknownAttribute",
            TranslateError::UnknownOperator(_) => "UnknownOperator",
            TranslateError::MissingVariable(_) => "MissingVariable",
            TranslateError::UnexpectedOperand(_) => "UnexpectedOperand",
            TranslateError::NullOperatorMisuse(_) => "NullOperatorMisuse",
            TranslateError::NotANestedPath(_) => "NotANestedPath",
            TranslateError::MalformedLambda(_) => "MalformedLambda",
            TranslateError::LambdaVariableMismatch(_) => "LambdaVariableMismatch",
            TranslateError::UnsupportedSizeComparison(_) => "UnsupportedSizeComparison",
            TranslateError::UnsupportedSizeExpression(_) => "UnsupportedSizeExpression",
            TranslateError::UnsupportedValueKind(_) => "UnsupportedValueKind",
        }
    }
}
