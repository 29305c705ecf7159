//! Memo Eval - validating, memoizing evaluator for arithmetic call trees.
//!
//! Folds an [`ExprNode`] tree rooted at a zero-parameter lambda down to one
//! `i64`. Call nodes execute externally supplied native functions; within
//! one evaluation, two calls with the same name and the same reduced
//! arguments run the native at most once.
//!
//! # Architecture
//!
//! - `evaluator`: post-order reducer, grammar checks inline with dispatch
//! - `evaluate_binary` / `evaluate_unary`: checked integer arithmetic
//! - `CallKey` / `CallCache`: call signatures and their memoized results
//! - `FunctionResolver` / `NativeRegistry`: the injected native functions
//! - `errors`: `EvalError`, `EvalErrorKind` and their constructors
//!
//! # Example
//!
//! ```
//! use memo_eval::{evaluate, ExprNode, NativeRegistry};
//!
//! let natives = NativeRegistry::new().with_int("C", |_| 2);
//! let root = ExprNode::lambda(ExprNode::neg(ExprNode::call("C", vec![])));
//! assert_eq!(evaluate(&root, &natives), Ok(-2));
//! ```

mod cache;
mod call_key;
pub mod errors;
mod evaluator;
mod natives;
mod operators;
mod stack;
mod unary_operators;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;

// Re-export the tree model so callers need only this crate.
pub use memo_ir::{BinaryOp, ExprNode, ForeignKind, NodeKind, UnaryOp, Value};

pub use cache::{CacheMode, CallCache};
pub use call_key::CallKey;
pub use errors::{EvalError, EvalErrorKind, EvalResult, Operator};
pub use evaluator::{evaluate, Evaluator, EvaluatorBuilder, MAX_CALL_ARITY};
pub use natives::{FunctionResolver, NativeFunction, NativeRegistry, NativeResult};
pub use operators::evaluate_binary;
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;
