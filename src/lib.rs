//! # testfunc
//!
//! A small harness for sanity-checking pure functions against a table of
//! `(args, expected)` or `(args, kwargs, expected)` cases. Every case is
//! invoked in isolation, classified as passed, failed or errored, and
//! collected into one report drawn when the host asks for it.
//!
//! ```rust
//! use testfunc::{args, builtins, tuple, BatchOptions, TestRunner};
//!
//! let mut runner = TestRunner::default();
//! runner.run_batch(&builtins::DIVMOD, [(args![10, 3], tuple![3, 1])], &BatchOptions::default());
//! assert_eq!(runner.summary_line().to_string(), "all 1 test(s) passed");
//! ```

pub use crate::callable::{check_arity, func, CallError, Callable, Invocation, NamedFn, Pure};
pub use crate::case::{normalize, NormalizedCase, RawCase};
pub use crate::error::CaseError;
pub use crate::report::{ReportConfig, ReportRow, Status, SummaryLine};
pub use crate::runner::{BatchOptions, Outcome, RunStatistics, TestRunner};
pub use crate::value::Value;

pub mod builtins;
pub mod callable;
pub mod case;
pub mod cli;
pub mod error;
pub mod report;
pub mod runner;
pub mod value;
