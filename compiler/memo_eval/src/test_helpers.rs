//! Shared fixtures for the evaluator's tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use memo_ir::{ExprNode, Value};

use crate::natives::NativeRegistry;

static TRACING: Once = Once::new();

/// Install a hierarchical tracing subscriber, once per test binary.
///
/// Only when `RUST_LOG` is set, e.g. `RUST_LOG=memo_eval=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init();
        }
    });
}

/// Number of times each fixture native ran.
#[derive(Clone, Default)]
pub struct Invocations(Arc<AtomicUsize>);

impl Invocations {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// The fixture functions:
///
/// - `A(x) = 5 + x`
/// - `B(x, y) = y / x + y * x` (counted)
/// - `C() = 2`
/// - `D(x) = x - 8`
/// - `F(x) = 0.7 * x` (returns a float)
/// - `Big(a, b, c, d, e, f) = a + b - c + d - e + f` (counted)
pub fn fixture_natives() -> (NativeRegistry, Invocations, Invocations) {
    let b_calls = Invocations::default();
    let big_calls = Invocations::default();

    let b = b_calls.clone();
    let big = big_calls.clone();
    let registry = NativeRegistry::new()
        .with_int("A", |args| 5 + args[0])
        .with_int("B", move |args| {
            b.bump();
            args[1] / args[0] + args[1] * args[0]
        })
        .with_int("C", |_| 2)
        .with_int("D", |args| args[0] - 8)
        .with("F", |args| Ok(Value::Float(0.7 * args[0] as f64)))
        .with_int("Big", move |args| {
            big.bump();
            args[0] + args[1] - args[2] + args[3] - args[4] + args[5]
        });

    (registry, b_calls, big_calls)
}

/// Shorthand for a call node.
pub fn call(name: &str, args: Vec<ExprNode>) -> ExprNode {
    ExprNode::call(name, args)
}

pub fn int(n: i64) -> ExprNode {
    ExprNode::int(n)
}
