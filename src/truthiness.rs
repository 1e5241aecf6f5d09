//! Static truthiness of attribute-value expressions
//!
//! A partial evaluator over [`Expression`] that decides whether an attribute
//! value is known to be missing or falsy. Anything it cannot see through is
//! given the benefit of the doubt.

use crate::ast::{Expression, LogicalOperator};
use std::fmt;

/// Classification of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truthiness {
    /// Known to produce an acceptable value
    Valid,
    /// Known to be missing or falsy (`undefined`, `false`, bare attribute)
    Invalid,
    /// Not statically determinable; treated as valid
    Unknown,
}

impl Truthiness {
    /// `Valid` and `Unknown` are both accepted
    pub fn is_acceptable(self) -> bool {
        !matches!(self, Truthiness::Invalid)
    }

    pub fn is_invalid(self) -> bool {
        self == Truthiness::Invalid
    }
}

impl fmt::Display for Truthiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truthiness::Valid => write!(f, "valid"),
            Truthiness::Invalid => write!(f, "invalid"),
            Truthiness::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify an attribute value; `None` is an attribute with no value
pub fn classify(value: Option<&Expression>) -> Truthiness {
    match value {
        None => Truthiness::Invalid,
        Some(expr) => classify_expression(expr),
    }
}

/// Classify an expression node
pub fn classify_expression(expr: &Expression) -> Truthiness {
    match expr {
        Expression::Undefined => Truthiness::Invalid,
        Expression::Identifier { name } if name == "undefined" => Truthiness::Invalid,
        Expression::BooleanLiteral { value: false } => Truthiness::Invalid,
        Expression::BooleanLiteral { value: true } => Truthiness::Valid,

        // "" marks a decorative image, so every literal is fine
        Expression::StringLiteral { .. } => Truthiness::Valid,
        // Substitutions always stringify, even `${undefined}`
        Expression::TemplateLiteral { .. } => Truthiness::Valid,
        Expression::BinaryExpression { .. } => Truthiness::Valid,
        Expression::ConditionalExpression { .. } => Truthiness::Valid,

        Expression::LogicalExpression {
            operator: LogicalOperator::Or,
            left,
            right,
        } => {
            let left = classify_expression(left);
            if left.is_acceptable() {
                return left;
            }
            classify_expression(right)
        }
        Expression::LogicalExpression {
            operator: LogicalOperator::And,
            right,
            ..
        } => classify_expression(right),

        Expression::Identifier { .. }
        | Expression::MemberExpression { .. }
        | Expression::CallExpression { .. }
        | Expression::FunctionExpression
        | Expression::ArrowFunctionExpression
        | Expression::UnaryExpression { .. }
        | Expression::NumericLiteral { .. }
        | Expression::NullLiteral
        | Expression::Other { .. } => Truthiness::Unknown,
    }
}
