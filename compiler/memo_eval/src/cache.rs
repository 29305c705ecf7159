//! Memoization cache for native calls.
//!
//! The cache maps a [`CallKey`] to the integer the native function returned
//! for it. There is no eviction: an evaluation can only populate as many
//! entries as its tree has distinct calls.

use rustc_hash::FxHashMap;

use crate::call_key::CallKey;

/// Lifetime of the call cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// A fresh cache for every evaluation. Results never leak between
    /// evaluations, and concurrent evaluations never contend.
    #[default]
    PerEvaluation,
    /// One cache owned by the `Evaluator` and reused by every evaluation on
    /// it. Only correct when the natives are pure across evaluations.
    /// Evaluations on the same evaluator serialize on the cache lock.
    ///
    /// The lock is held while natives run, so a native that evaluates
    /// through the same `Evaluator` deadlocks. Natives that need to
    /// re-enter must use an evaluator in [`PerEvaluation`](Self::PerEvaluation)
    /// mode.
    Shared,
}

/// Results of native calls keyed by call signature.
#[derive(Clone, Debug, Default)]
pub struct CallCache {
    entries: FxHashMap<CallKey, i64>,
}

impl CallCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result.
    #[inline]
    pub fn lookup(&self, key: &CallKey) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Store a result. A second insert for the same key overwrites.
    pub fn insert(&mut self, key: CallKey, value: i64) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
