//! `EvaluatorBuilder` for creating `Evaluator` instances with various configurations.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Evaluator, MAX_CALL_ARITY};
use crate::cache::{CacheMode, CallCache};
use crate::natives::FunctionResolver;

/// Builder for [`Evaluator`].
///
/// Defaults: at most [`MAX_CALL_ARITY`] arguments per call, and a fresh
/// call cache per evaluation.
pub struct EvaluatorBuilder {
    natives: Arc<dyn FunctionResolver>,
    max_call_arity: usize,
    cache_mode: CacheMode,
}

impl EvaluatorBuilder {
    pub fn new(natives: impl FunctionResolver + 'static) -> Self {
        Self {
            natives: Arc::new(natives),
            max_call_arity: MAX_CALL_ARITY,
            cache_mode: CacheMode::default(),
        }
    }

    /// Set the largest argument count a call node may carry.
    #[must_use]
    pub fn max_call_arity(mut self, max: usize) -> Self {
        self.max_call_arity = max;
        self
    }

    /// Set whether memoized results outlive a single evaluation.
    #[must_use]
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            natives: self.natives,
            max_call_arity: self.max_call_arity,
            cache_mode: self.cache_mode,
            shared_cache: Mutex::new(CallCache::new()),
        }
    }
}
