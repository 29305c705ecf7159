//! Evaluator test suites kept out of the implementation files.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod scenario_tests;
