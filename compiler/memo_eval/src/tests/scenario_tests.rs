//! End-to-end evaluation scenarios.
//!
//! Trees mirror what a host would build for expressions such as
//! `() => A(1) + B(2 + C(), 3) * B(4, -D(5))`, evaluated against the
//! fixture natives in `test_helpers`.

use memo_ir::{BinaryOp, ExprNode, ForeignKind, NodeKind, UnaryOp};
use pretty_assertions::assert_eq;

use crate::errors::{EvalErrorKind, Operator};
use crate::evaluator::{evaluate, Evaluator};
use crate::natives::NativeRegistry;
use crate::test_helpers::{call, fixture_natives, init_tracing, int};

/// `A(1) + B(2 + C(), 3) * B(4, -D(5))`
fn folding_tree() -> ExprNode {
    ExprNode::lambda(ExprNode::add(
        call("A", vec![int(1)]),
        ExprNode::mul(
            call("B", vec![ExprNode::add(int(2), call("C", vec![])), int(3)]),
            call("B", vec![int(4), ExprNode::neg(call("D", vec![int(5)]))]),
        ),
    ))
}

/// `B(2 + C(), 3) * B(4, -D(5)) / B(4, 3) + B(81 / A(22) + 1, 6 * C() / 4)`
fn memoization_tree() -> ExprNode {
    ExprNode::lambda(ExprNode::add(
        ExprNode::div(
            ExprNode::mul(
                call("B", vec![ExprNode::add(int(2), call("C", vec![])), int(3)]),
                call("B", vec![int(4), ExprNode::neg(call("D", vec![int(5)]))]),
            ),
            call("B", vec![int(4), int(3)]),
        ),
        call(
            "B",
            vec![
                ExprNode::add(ExprNode::div(int(81), call("A", vec![int(22)])), int(1)),
                ExprNode::div(ExprNode::mul(int(6), call("C", vec![])), int(4)),
            ],
        ),
    ))
}

#[test]
fn folds_nested_calls_to_150() {
    init_tracing();
    let (natives, _, _) = fixture_natives();
    assert_eq!(evaluate(&folding_tree(), &natives).unwrap(), 150);
}

#[test]
fn repeated_negation() {
    let (natives, _, _) = fixture_natives();
    let mut body = call("C", vec![]);
    for _ in 0..5 {
        body = ExprNode::neg(body);
    }
    assert_eq!(body.to_string(), "-(-(-(-(-C()))))");
    assert_eq!(evaluate(&ExprNode::lambda(body), &natives).unwrap(), -2);
}

#[test]
fn checked_negation_folds_like_negation() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::unary(UnaryOp::NegChecked, call("C", vec![])));
    assert_eq!(evaluate(&root, &natives).unwrap(), -2);
}

#[test]
fn xor_is_rejected_before_operands_run() {
    let (natives, b_calls, _) = fixture_natives();
    // 2 + B(1, 1) ^ 2, grouped as (2 + B(1, 1)) ^ 2
    let root = ExprNode::lambda(ExprNode::binary(
        BinaryOp::BitXor,
        ExprNode::add(int(2), call("B", vec![int(1), int(1)])),
        int(2),
    ));

    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperator {
            op: Operator::Binary(BinaryOp::BitXor)
        }
    );
    assert_eq!(err.node.as_deref(), Some("2 + B(1, 1) ^ 2"));
    assert_eq!(b_calls.get(), 0);
}

#[test]
fn unsupported_unary_operator() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::unary(UnaryOp::BitNot, int(1)));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperator {
            op: Operator::Unary(UnaryOp::BitNot)
        }
    );
}

#[test]
fn native_runs_once_per_distinct_signature() {
    init_tracing();
    let (natives, b_calls, _) = fixture_natives();

    let result = evaluate(&memoization_tree(), &natives).unwrap();

    // All four B call sites reduce to B(4, 3) = 12: 12 * 12 / 12 + 12
    assert_eq!(result, 24);
    assert_eq!(b_calls.get(), 1);
}

#[test]
fn distinct_signatures_each_run() {
    let (natives, b_calls, _) = fixture_natives();
    // B(1, 2) + B(2, 1) + B(1, 2)
    let root = ExprNode::lambda(ExprNode::add(
        ExprNode::add(
            call("B", vec![int(1), int(2)]),
            call("B", vec![int(2), int(1)]),
        ),
        call("B", vec![int(1), int(2)]),
    ));

    // B(1, 2) = 4, B(2, 1) = 2
    assert_eq!(evaluate(&root, &natives).unwrap(), 10);
    assert_eq!(b_calls.get(), 2);
}

#[test]
fn float_argument_is_a_type_mismatch() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(call("E", vec![ExprNode::float(5.78), int(2)]));

    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "int",
            got: "float"
        }
    );
    assert_eq!(err.node.as_deref(), Some("5.78"));
}

#[test]
fn float_result_is_a_type_mismatch() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::add(int(1), call("F", vec![int(5)])));

    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "int",
            got: "float"
        }
    );
    assert_eq!(err.node.as_deref(), Some("F(5)"));
}

#[test]
fn bool_literal_is_a_type_mismatch() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::constant(true));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "int",
            got: "bool"
        }
    );
}

#[test]
fn six_arguments_exceed_arity_before_anything_runs() {
    let (natives, b_calls, big_calls) = fixture_natives();
    let mut args: Vec<ExprNode> = (1..=5).map(int).collect();
    args.push(call("B", vec![int(4), int(3)]));
    let root = ExprNode::lambda(call("Big", args));

    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityExceeded {
            function: "Big".into(),
            max: 5,
            got: 6
        }
    );
    assert_eq!(b_calls.get(), 0);
    assert_eq!(big_calls.get(), 0);
}

#[test]
fn five_arguments_are_allowed() {
    let natives = crate::natives::NativeRegistry::new()
        .with_int("Sum", |args| args.iter().sum());
    let root = ExprNode::lambda(call("Sum", (1..=5).map(int).collect()));
    assert_eq!(evaluate(&root, &natives).unwrap(), 15);
}

#[test]
fn conversion_node_is_unsupported() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::convert(call("F", vec![int(5)])));

    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedExpressionKind {
            kind: NodeKind::Foreign(ForeignKind::Convert)
        }
    );
    assert_eq!(err.to_string(), "unsupported expression kind: Convert in `Convert(F(5))`");
}

#[test]
fn nested_lambda_is_unsupported() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::add(int(1), ExprNode::lambda(int(2))));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedExpressionKind {
            kind: NodeKind::Lambda
        }
    );
}

#[test]
fn division_and_modulo_by_zero() {
    let (natives, _, _) = fixture_natives();
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        // 1 op (C() - 2)
        let root = ExprNode::lambda(ExprNode::binary(
            op,
            int(1),
            ExprNode::sub(call("C", vec![]), int(2)),
        ));
        let err = evaluate(&root, &natives).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero { op });
    }
}

#[test]
fn failure_stops_traversal() {
    let (natives, b_calls, _) = fixture_natives();
    let root = ExprNode::lambda(ExprNode::add(
        ExprNode::div(int(1), int(0)),
        call("B", vec![int(4), int(3)]),
    ));

    assert!(evaluate(&root, &natives).is_err());
    assert_eq!(b_calls.get(), 0);
}

#[test]
fn non_lambda_root_is_rejected() {
    let (natives, _, _) = fixture_natives();
    let err = evaluate(&call("C", vec![]), &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NotALambdaExpression {
            found: NodeKind::Call
        }
    );
}

#[test]
fn lambda_with_parameters_is_rejected() {
    let (natives, b_calls, _) = fixture_natives();
    let root = ExprNode::lambda_with_params(vec!["x".into()], call("B", vec![int(4), int(3)]));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::NotAZeroArityLambda { params: 1 });
    assert_eq!(b_calls.get(), 0);
}

#[test]
fn undefined_function_propagates_unchanged() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda(call("Nope", vec![int(1)]));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedFunction {
            name: "Nope".into()
        }
    );
    assert_eq!(err.node, None);
}

#[test]
fn native_failure_propagates_unchanged() {
    let natives = crate::natives::NativeRegistry::new()
        .with("Flaky", |_| Err(crate::errors::EvalError::native("Flaky", "timed out")));
    let root = ExprNode::lambda(call("Flaky", vec![]));
    let err = evaluate(&root, &natives).unwrap_err();
    assert_eq!(err, crate::errors::EvalError::native("Flaky", "timed out"));
}

#[test]
fn re_evaluation_is_idempotent() {
    let (natives, b_calls, _) = fixture_natives();
    let evaluator = Evaluator::new(natives);
    let tree = memoization_tree();

    let first = evaluator.evaluate(&tree).unwrap();
    let second = evaluator.evaluate(&tree).unwrap();

    assert_eq!(first, second);
    // Fresh cache per evaluation: B ran once each time.
    assert_eq!(b_calls.get(), 2);
}

#[test]
fn deeply_nested_tree_does_not_overflow() {
    let (natives, _, _) = fixture_natives();
    let mut body = call("C", vec![]);
    for _ in 0..100_000 {
        body = ExprNode::neg(body);
    }
    let root = ExprNode::lambda(body);

    assert_eq!(evaluate(&root, &natives).unwrap(), 2);
}

/// 100k nested negations of `C()`.
fn deep_negation(levels: usize) -> ExprNode {
    let mut body = call("C", vec![]);
    for _ in 0..levels {
        body = ExprNode::neg(body);
    }
    body
}

#[test]
fn deep_root_with_parameters_reports_a_truncated_node() {
    let (natives, _, _) = fixture_natives();
    let root = ExprNode::lambda_with_params(vec!["x".into()], deep_negation(100_000));

    let err = evaluate(&root, &natives).unwrap_err();

    assert_eq!(err.kind, EvalErrorKind::NotAZeroArityLambda { params: 1 });
    assert_eq!(err.node.as_deref(), Some("(x) => -(-(-…))"));
}

#[test]
fn overflow_atop_deep_chain_reports_a_truncated_node() {
    let (natives, _, _) = fixture_natives();
    let mut body = int(0);
    for _ in 0..100_000 {
        body = ExprNode::add(body, int(0));
    }
    let root = ExprNode::lambda(ExprNode::add(
        ExprNode::add(body, int(1)),
        int(i64::MAX),
    ));

    let err = evaluate(&root, &natives).unwrap_err();

    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert_eq!(err.node.as_deref(), Some("… + … + 0 + 1 + 9223372036854775807"));
}

#[test]
fn comma_in_function_name_does_not_alias_a_call() {
    let natives = NativeRegistry::new()
        .with_int("B", |args| args[0] * 100)
        .with_int("B,1", |_| 7);
    // `B,1() + B(1)`
    let root = ExprNode::lambda(ExprNode::add(call("B,1", vec![]), call("B", vec![int(1)])));

    assert_eq!(evaluate(&root, &natives), Ok(107));
}
