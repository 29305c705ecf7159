//! Memo IR - expression tree model for the memoizing evaluator.
//!
//! This crate contains data only:
//! - `ExprNode`: the closed set of node shapes an evaluation consumes
//! - `BinaryOp` / `UnaryOp`: the full host operator sets
//! - `Value`: constants carried by literals and returned by natives
//! - `NodeKind` / `ForeignKind`: tags used in diagnostics
//!
//! The model is deliberately wider than what the evaluator accepts. Shapes
//! such as conversions, bitwise operators and float constants can be
//! expressed so that validation can reject them by name.

mod expr;
mod operators;
mod value;

pub use expr::{ExprNode, ForeignKind, NodeKind};
pub use operators::{BinaryOp, UnaryOp};
pub use value::Value;
