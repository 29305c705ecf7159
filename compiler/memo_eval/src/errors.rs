//! Error types and centralized error constructors for the evaluator.
//!
//! Every failure is fatal to the evaluation that raised it. `EvalErrorKind`
//! carries the structured category so callers can match on it; the
//! factory functions below are the only place messages are produced.
//!
//! # Usage
//!
//! ```ignore
//! use memo_eval::errors::{division_by_zero, type_mismatch};
//! ```

use memo_ir::{BinaryOp, ExprNode, NodeKind, UnaryOp};
use std::fmt;

/// Result of evaluation.
pub type EvalResult<T = i64> = Result<T, EvalError>;

/// An operator as it appeared in the tree, for error reporting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Binary(op) => write!(f, "{op:?} (`{}`)", op.as_symbol()),
            Operator::Unary(op) => write!(f, "unary {op:?} (`{}`)", op.as_symbol()),
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Root shape
    #[error("expression root must be a lambda, found {found}")]
    NotALambdaExpression { found: NodeKind },
    #[error("root lambda must take no parameters, found {params}")]
    NotAZeroArityLambda { params: usize },

    // Grammar
    #[error("unsupported expression kind: {kind}")]
    UnsupportedExpressionKind { kind: NodeKind },
    #[error("unsupported operator: {op}")]
    UnsupportedOperator { op: Operator },
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("{function} called with {got} arguments, at most {max} are allowed")]
    ArityExceeded {
        function: String,
        max: usize,
        got: usize,
    },

    // Arithmetic
    #[error("{} by zero", zero_divisor_name(.op))]
    DivisionByZero { op: BinaryOp },
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    // Native functions
    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },
    #[error("native function {function} failed: {message}")]
    NativeFailure { function: String, message: String },
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "called from the derived Display, which only has a reference"
)]
fn zero_divisor_name(op: &BinaryOp) -> &'static str {
    if *op == BinaryOp::Mod {
        "modulo"
    } else {
        "division"
    }
}

/// Levels of the failing node kept in its description; deeper subtrees
/// print as `…`.
pub const NODE_DESCRIPTION_DEPTH: usize = 4;

/// Evaluation error.
///
/// `node` holds the printed form of the node that failed, when the
/// failure is tied to one, truncated to [`NODE_DESCRIPTION_DEPTH`] levels.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", in_node(.node.as_deref()))]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub node: Option<String>,
}

fn in_node(node: Option<&str>) -> String {
    node.map(|n| format!(" in `{n}`")).unwrap_or_default()
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, node: None }
    }

    /// Error raised by a native function itself.
    #[cold]
    pub fn native(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::NativeFailure {
            function: function.into(),
            message: message.into(),
        })
    }

    /// Attach the failing node. The innermost node wins.
    #[must_use]
    pub fn at(mut self, node: &ExprNode) -> Self {
        if self.node.is_none() {
            self.node = Some(node.truncated(NODE_DESCRIPTION_DEPTH).to_string());
        }
        self
    }

    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Root Shape Errors

#[cold]
pub fn not_a_lambda(found: NodeKind) -> EvalError {
    EvalErrorKind::NotALambdaExpression { found }.into()
}

#[cold]
pub fn not_zero_arity(params: usize) -> EvalError {
    EvalErrorKind::NotAZeroArityLambda { params }.into()
}

// Grammar Errors

#[cold]
pub fn unsupported_kind(kind: NodeKind) -> EvalError {
    EvalErrorKind::UnsupportedExpressionKind { kind }.into()
}

#[cold]
pub fn unsupported_operator(op: Operator) -> EvalError {
    EvalErrorKind::UnsupportedOperator { op }.into()
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalErrorKind::TypeMismatch { expected, got }.into()
}

#[cold]
pub fn arity_exceeded(function: &str, max: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityExceeded {
        function: function.to_owned(),
        max,
        got,
    }
    .into()
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero(op: BinaryOp) -> EvalError {
    EvalErrorKind::DivisionByZero { op }.into()
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}

// Native Function Errors

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalErrorKind::UndefinedFunction {
        name: name.to_owned(),
    }
    .into()
}
