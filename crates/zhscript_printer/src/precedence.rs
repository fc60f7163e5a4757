//! Expression binding strengths used to decide where parentheses go.
//!
//! Binary levels reuse [`BinaryOperator::precedence`]; the constants here
//! slot the remaining expression forms around them.

use zhscript_ast::{BinaryOperator, Expression, UnaryOperator};

pub const ASSIGNMENT: u8 = 2;
pub const CONDITIONAL: u8 = 3;
/// Lowest binary level (`||`, `??`).
pub const LOGICAL_OR: u8 = 4;
pub const UNARY: u8 = 11;
/// Calls, member accesses and lowered JSX.
pub const CALL: u8 = 13;
pub const PRIMARY: u8 = 14;

pub fn expression_precedence(expr: &Expression<'_>) -> u8 {
    match expr {
        Expression::Assignment(_) => ASSIGNMENT,
        Expression::Conditional(_) => CONDITIONAL,
        Expression::Binary(b) => b.operator.precedence(),
        Expression::Unary(_) => UNARY,
        Expression::Call(_) | Expression::Member(_) | Expression::JsxElement(_) | Expression::JsxFragment(_) => {
            CALL
        }
        Expression::Identifier(_) | Expression::Literal(_) | Expression::Array(_) | Expression::Object(_) => PRIMARY,
    }
}

/// `??` cannot share an unparenthesized operand with `&&` or `||`.
pub fn mixes_nullish(parent: BinaryOperator, child: &Expression<'_>) -> bool {
    let Expression::Binary(child) = child else {
        return false;
    };
    let nullish = |op: BinaryOperator| op == BinaryOperator::NullishCoalescing;
    let and_or = |op: BinaryOperator| matches!(op, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr);
    (nullish(parent) && and_or(child.operator)) || (and_or(parent) && nullish(child.operator))
}

/// The operand of `op` would fuse with it into `--` or `++`.
pub fn fuses_with_sign(op: UnaryOperator, argument: &Expression<'_>) -> bool {
    match (op, argument) {
        (UnaryOperator::Minus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Minus,
        (UnaryOperator::Plus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Plus,
        _ => false,
    }
}

/// Whether the printed form of `expr` begins with an object literal's `{`.
pub fn starts_with_object(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Object(_) => true,
        Expression::Binary(b) => starts_with_object(b.left),
        Expression::Assignment(a) => starts_with_object(a.left),
        Expression::Conditional(c) => starts_with_object(c.test),
        Expression::Call(c) => starts_with_object(c.callee),
        Expression::Member(m) => starts_with_object(m.object),
        _ => false,
    }
}
