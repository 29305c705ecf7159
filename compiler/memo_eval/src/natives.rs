//! Native function resolution.
//!
//! Call nodes name functions that live outside the tree. The evaluator asks
//! a [`FunctionResolver`] for each name it has to execute and invokes the
//! returned [`NativeFunction`] with already-reduced integer arguments.
//!
//! [`NativeRegistry`] is the in-process resolver: a name-keyed table of
//! closures. Hosts with their own lookup (plugins, reflection tables, RPC
//! stubs) implement `FunctionResolver` directly.

use std::fmt;
use std::sync::Arc;

use memo_ir::Value;
use rustc_hash::FxHashMap;

use crate::errors::{undefined_function, EvalError};

/// Result of invoking a native function.
///
/// Natives may return any `Value`; the evaluator rejects non-integers.
pub type NativeResult = Result<Value, EvalError>;

type NativeFnImpl = dyn Fn(&[i64]) -> NativeResult + Send + Sync;

/// A cloneable handle to a native function.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    func: Arc<NativeFnImpl>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[i64]) -> NativeResult + Send + Sync + 'static,
    {
        NativeFunction {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the function. Runs synchronously on the caller's thread.
    #[inline]
    pub fn invoke(&self, args: &[i64]) -> NativeResult {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Maps function names to callables.
///
/// Errors returned from `resolve` (for example an unknown name) reach the
/// caller of `evaluate` unchanged.
pub trait FunctionResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<NativeFunction, EvalError>;
}

impl<T: FunctionResolver + ?Sized> FunctionResolver for Arc<T> {
    fn resolve(&self, name: &str) -> Result<NativeFunction, EvalError> {
        (**self).resolve(name)
    }
}

impl<T: FunctionResolver + ?Sized> FunctionResolver for &T {
    fn resolve(&self, name: &str) -> Result<NativeFunction, EvalError> {
        (**self).resolve(name)
    }
}

/// Table-backed resolver.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    functions: FxHashMap<String, NativeFunction>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[i64]) -> NativeResult + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_owned(), NativeFunction::new(name, func));
    }

    /// Register a function that always produces an integer.
    pub fn register_int<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[i64]) -> i64 + Send + Sync + 'static,
    {
        self.register(name, move |args| Ok(Value::Int(func(args))));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&[i64]) -> NativeResult + Send + Sync + 'static,
    {
        self.register(name, func);
        self
    }

    /// Builder-style [`register_int`](Self::register_int).
    #[must_use]
    pub fn with_int<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&[i64]) -> i64 + Send + Sync + 'static,
    {
        self.register_int(name, func);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FunctionResolver for NativeRegistry {
    fn resolve(&self, name: &str) -> Result<NativeFunction, EvalError> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| undefined_function(name))
    }
}
