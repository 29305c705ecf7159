//! Cache key for a reduced call.
//!
//! A call is identified by its function name and its reduced argument
//! values, kept as separate fields so that no choice of name can alias
//! another call. The key prints as `name` (no arguments) or
//! `name,arg1,arg2,...`, with integers in plain decimal.

use std::fmt;

use smallvec::SmallVec;

use crate::evaluator::MAX_CALL_ARITY;

/// Key for looking up memoized call results.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallKey {
    function: Box<str>,
    args: SmallVec<[i64; MAX_CALL_ARITY]>,
}

impl CallKey {
    /// Build the key for `function` applied to already-reduced `args`.
    pub fn new(function: &str, args: &[i64]) -> Self {
        CallKey {
            function: function.into(),
            args: SmallVec::from_slice(args),
        }
    }

    #[inline]
    pub fn function(&self) -> &str {
        &self.function
    }

    #[inline]
    pub fn args(&self) -> &[i64] {
        &self.args
    }
}

impl fmt::Display for CallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function)?;
        for arg in &self.args {
            write!(f, ",{arg}")?;
        }
        Ok(())
    }
}
