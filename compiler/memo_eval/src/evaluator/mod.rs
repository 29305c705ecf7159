//! Tree-walking evaluator with per-call memoization.
//!
//! Reduction is strict post-order: every child is reduced to an integer
//! before its parent. Grammar checks run when a node is visited, so the
//! first invalid node anywhere aborts the evaluation and nothing after it
//! in traversal order executes.
//!
//! Call nodes reduce their arguments left to right, then consult the
//! [`CallCache`] under the call's [`CallKey`]. A hit returns the stored
//! result without invoking the native again.

mod builder;

use std::sync::Arc;

use memo_ir::{BinaryOp, ExprNode, UnaryOp};
use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::cache::{CacheMode, CallCache};
use crate::call_key::CallKey;
use crate::errors::{
    arity_exceeded, not_a_lambda, not_zero_arity, type_mismatch, unsupported_kind,
    unsupported_operator, EvalResult, Operator,
};
use crate::natives::FunctionResolver;
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;

pub use builder::EvaluatorBuilder;

/// Maximum number of arguments a call node may carry.
pub const MAX_CALL_ARITY: usize = 5;

/// Evaluate `root` with a fresh call cache and default limits.
///
/// `root` must be a zero-parameter lambda. Errors raised by `natives`
/// propagate unchanged.
pub fn evaluate(root: &ExprNode, natives: &dyn FunctionResolver) -> EvalResult {
    let body = lambda_body(root)?;
    let mut cache = CallCache::new();
    Reducer {
        natives,
        cache: &mut cache,
        max_call_arity: MAX_CALL_ARITY,
    }
    .reduce(body)
}

/// Unwrap the root lambda, rejecting any other root shape before
/// traversal starts.
fn lambda_body(root: &ExprNode) -> EvalResult<&ExprNode> {
    match root {
        ExprNode::Lambda { params, body } if params.is_empty() => Ok(body.as_ref()),
        ExprNode::Lambda { params, .. } => Err(not_zero_arity(params.len()).at(root)),
        other => Err(not_a_lambda(other.kind()).at(other)),
    }
}

/// Reusable evaluator: a function resolver plus configuration.
///
/// `Evaluator` is `Send + Sync`. In [`CacheMode::PerEvaluation`] (the
/// default) each call to [`evaluate`](Self::evaluate) owns its cache, so
/// concurrent evaluations are independent.
pub struct Evaluator {
    natives: Arc<dyn FunctionResolver>,
    max_call_arity: usize,
    cache_mode: CacheMode,
    /// Used only in `CacheMode::Shared`.
    shared_cache: Mutex<CallCache>,
}

impl Evaluator {
    /// Evaluator with default configuration.
    pub fn new(natives: impl FunctionResolver + 'static) -> Self {
        EvaluatorBuilder::new(natives).build()
    }

    pub fn builder(natives: impl FunctionResolver + 'static) -> EvaluatorBuilder {
        EvaluatorBuilder::new(natives)
    }

    /// Evaluate a tree rooted at a zero-parameter lambda.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&self, root: &ExprNode) -> EvalResult {
        let body = lambda_body(root)?;
        let result = match self.cache_mode {
            CacheMode::PerEvaluation => {
                let mut cache = CallCache::new();
                self.reducer(&mut cache).reduce(body)
            }
            CacheMode::Shared => {
                let mut cache = self.shared_cache.lock();
                self.reducer(&mut cache).reduce(body)
            }
        };
        match &result {
            Ok(value) => tracing::debug!(value, "evaluation finished"),
            Err(err) => tracing::debug!(error = %err, "evaluation failed"),
        }
        result
    }

    pub fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    pub fn max_call_arity(&self) -> usize {
        self.max_call_arity
    }

    /// Number of results held by the shared cache. Always zero in
    /// per-evaluation mode.
    pub fn cached_calls(&self) -> usize {
        self.shared_cache.lock().len()
    }

    /// Drop every result held by the shared cache.
    pub fn clear_cache(&self) {
        let mut cache = self.shared_cache.lock();
        tracing::debug!(entries = cache.len(), "clearing shared call cache");
        cache.clear();
    }

    fn reducer<'a>(&'a self, cache: &'a mut CallCache) -> Reducer<'a> {
        Reducer {
            natives: &*self.natives,
            cache,
            max_call_arity: self.max_call_arity,
        }
    }
}

/// State of one evaluation.
struct Reducer<'a> {
    natives: &'a dyn FunctionResolver,
    cache: &'a mut CallCache,
    max_call_arity: usize,
}

impl Reducer<'_> {
    fn reduce(&mut self, node: &ExprNode) -> EvalResult {
        ensure_sufficient_stack(|| self.reduce_node(node))
    }

    fn reduce_node(&mut self, node: &ExprNode) -> EvalResult {
        match node {
            ExprNode::Constant(value) => value
                .as_int()
                .ok_or_else(|| type_mismatch("int", value.type_name()).at(node)),
            ExprNode::Unary { op, operand } => self.reduce_unary(node, *op, operand),
            ExprNode::Binary { op, left, right } => self.reduce_binary(node, *op, left, right),
            ExprNode::Call { function, args } => self.reduce_call(node, function, args),
            // Only the root may be a lambda; it was unwrapped before reduction.
            ExprNode::Lambda { .. } | ExprNode::Foreign { .. } => {
                Err(unsupported_kind(node.kind()).at(node))
            }
        }
    }

    fn reduce_unary(&mut self, node: &ExprNode, op: UnaryOp, operand: &ExprNode) -> EvalResult {
        if !op.is_negation() {
            return Err(unsupported_operator(Operator::Unary(op)).at(node));
        }
        let value = self.reduce(operand)?;
        evaluate_unary(value, op).map_err(|e| e.at(node))
    }

    fn reduce_binary(
        &mut self,
        node: &ExprNode,
        op: BinaryOp,
        left: &ExprNode,
        right: &ExprNode,
    ) -> EvalResult {
        if !op.is_arithmetic() {
            return Err(unsupported_operator(Operator::Binary(op)).at(node));
        }
        let left = self.reduce(left)?;
        let right = self.reduce(right)?;
        evaluate_binary(left, right, op).map_err(|e| e.at(node))
    }

    fn reduce_call(&mut self, node: &ExprNode, function: &str, args: &[ExprNode]) -> EvalResult {
        if args.len() > self.max_call_arity {
            return Err(arity_exceeded(function, self.max_call_arity, args.len()).at(node));
        }

        let mut values: SmallVec<[i64; MAX_CALL_ARITY]> = SmallVec::with_capacity(args.len());
        for arg in args {
            values.push(self.reduce(arg)?);
        }

        let key = CallKey::new(function, &values);
        if let Some(cached) = self.cache.lookup(&key) {
            tracing::trace!(%key, cached, "call cache hit");
            return Ok(cached);
        }

        let native = self.natives.resolve(function)?;
        let returned = native.invoke(&values)?;
        let value = returned
            .as_int()
            .ok_or_else(|| type_mismatch("int", returned.type_name()).at(node))?;
        tracing::debug!(%key, value, "invoked native function");

        self.cache.insert(key, value);
        Ok(value)
    }
}
