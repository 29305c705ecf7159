//! Binary operator implementations for the evaluator.
//!
//! Operands are already reduced to integers. All arithmetic is checked:
//! checked and unchecked operator forms fold the same way, and overflow is
//! reported rather than wrapped.

use memo_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, unsupported_operator, EvalResult, Operator,
};

/// Checked arithmetic operation with overflow handling.
///
/// Used for Add, Sub, Mul where the only error case is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.ok_or_else(|| integer_overflow(op_name))
}

/// Checked division or remainder with zero guard.
///
/// Returns `division_by_zero` if the divisor is zero, `integer_overflow` for
/// `i64::MIN / -1`.
#[inline]
fn checked_div<F>(divisor: i64, op: BinaryOp, apply: F, op_name: &'static str) -> EvalResult
where
    F: FnOnce() -> Option<i64>,
{
    if divisor == 0 {
        Err(division_by_zero(op))
    } else {
        apply().ok_or_else(|| integer_overflow(op_name))
    }
}

/// Evaluate a binary operation on two reduced operands.
pub fn evaluate_binary(left: i64, right: i64, op: BinaryOp) -> EvalResult {
    match op.unchecked() {
        BinaryOp::Add => checked_arith(left.checked_add(right), "addition"),
        BinaryOp::Sub => checked_arith(left.checked_sub(right), "subtraction"),
        BinaryOp::Mul => checked_arith(left.checked_mul(right), "multiplication"),
        BinaryOp::Div => checked_div(right, op, || left.checked_div(right), "division"),
        BinaryOp::Mod => checked_div(right, op, || left.checked_rem(right), "remainder"),
        _ => Err(unsupported_operator(Operator::Binary(op))),
    }
}
