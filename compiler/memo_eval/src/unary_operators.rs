//! Unary operator implementations for the evaluator.

use memo_ir::UnaryOp;

use crate::errors::{integer_overflow, unsupported_operator, EvalResult, Operator};

/// Evaluate a unary operation on a reduced operand.
///
/// Negation is the only foldable unary form; `-i64::MIN` overflows.
pub fn evaluate_unary(value: i64, op: UnaryOp) -> EvalResult {
    if op.is_negation() {
        value
            .checked_neg()
            .ok_or_else(|| integer_overflow("negation"))
    } else {
        Err(unsupported_operator(Operator::Unary(op)))
    }
}
