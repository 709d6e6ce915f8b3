//! # Invocation Engine
//!
//! [`TestRunner`] owns the run statistics and the report rows for every
//! batch it executes. Each case moves through
//! `normalize -> invoke -> compare` and ends up passed, failed or errored;
//! no case failure ever escapes [`TestRunner::run_batch`].

use crate::callable::{CallError, Callable, Invocation};
use crate::case::{normalize, RawCase};
use crate::error::CaseError;
use crate::report::{self, ReportConfig, ReportRow, Status, SummaryLine, TableSink, TextTable};
use crate::value::Value;
use serde::Serialize;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;
use termcolor::{ColorChoice, StandardStream, WriteColor};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Counters accumulated across every batch of one runner. Never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub total: usize,
    /// Cases whose result did not equal the expected value.
    pub fail: usize,
    /// Malformed cases and cases whose callee failed.
    pub error: usize,
}

impl RunStatistics {
    pub fn passed(&self) -> usize {
        self.total.saturating_sub(self.fail + self.error)
    }

    pub fn has_failures(&self) -> bool {
        self.fail + self.error > 0
    }
}

/// Per-batch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Informational label, logged when the batch starts.
    pub summary: Option<String>,
    /// Spread `Value::Args` into several positional arguments.
    pub unpack: bool,
}

impl BatchOptions {
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn unpack(mut self, unpack: bool) -> Self {
        self.unpack = unpack;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            summary: None,
            unpack: true,
        }
    }
}

/// Classification of a case whose callee returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed { actual: Value },
    Failed { actual: Value, expected: Value },
}

/// A returned call, before it is turned into a row.
struct Evaluated {
    call: String,
    elapsed: f64,
    outcome: Outcome,
}

// ============================================================================
// RUNNER
// ============================================================================

/// Runs batches of cases and collects one report for all of them.
///
/// ```rust
/// use testfunc::{builtins, BatchOptions, TestRunner};
///
/// let mut runner = TestRunner::default();
/// runner.run_batch(&builtins::ABS, [(1, 1), (-2, 2)], &BatchOptions::default());
/// assert_eq!(runner.stats().total, 2);
/// assert!(!runner.stats().has_failures());
/// ```
#[derive(Debug, Default)]
pub struct TestRunner {
    stats: RunStatistics,
    rows: Vec<ReportRow>,
    config: ReportConfig,
}

impl TestRunner {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            stats: RunStatistics::default(),
            rows: Vec::new(),
            config,
        }
    }

    pub fn stats(&self) -> RunStatistics {
        self.stats
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn summary_line(&self) -> SummaryLine {
        SummaryLine::from_stats(&self.stats)
    }

    /// Invokes `func` once per case, in order.
    pub fn run_batch<I, C>(&mut self, func: &dyn Callable, cases: I, options: &BatchOptions)
    where
        I: IntoIterator<Item = C>,
        C: Into<RawCase>,
    {
        match &options.summary {
            Some(summary) => tracing::info!(func = func.name(), "{}", summary),
            None => tracing::debug!(func = func.name(), "running batch"),
        }
        for case in cases {
            let _ = self.run_case(func, &case.into(), options.unpack);
        }
    }

    /// Processes a single case, updating the statistics and the report.
    ///
    /// The returned error has already been logged and counted.
    pub fn run_case(
        &mut self,
        func: &dyn Callable,
        case: &RawCase,
        unpack: bool,
    ) -> Result<Outcome, CaseError> {
        self.stats.total += 1;
        match evaluate(func, case, unpack) {
            Ok(Evaluated {
                call,
                elapsed,
                outcome,
            }) => {
                let row = match &outcome {
                    Outcome::Passed { actual } => {
                        tracing::debug!(call = %call, "passed");
                        ReportRow {
                            call,
                            elapsed,
                            result: actual.clone(),
                            expected: None,
                            status: Status::Pass,
                        }
                    }
                    Outcome::Failed { actual, expected } => {
                        self.stats.fail += 1;
                        tracing::debug!(call = %call, expected = %expected.repr(), "failed");
                        ReportRow {
                            call,
                            elapsed,
                            result: actual.clone(),
                            expected: Some(expected.clone()),
                            status: Status::Fail,
                        }
                    }
                };
                self.rows.push(row);
                Ok(outcome)
            }
            Err(err) => {
                self.stats.error += 1;
                log_case_error(&err);
                Err(err)
            }
        }
    }

    /// Draws every collected row through `sink`, then the summary line.
    ///
    /// The sink is consumed and handed back filled, so each render starts
    /// from the sink the caller built for it.
    pub fn render_with<S: TableSink>(&self, mut sink: S, out: &mut dyn WriteColor) -> io::Result<S> {
        report::render(&self.rows, &self.stats, &mut sink, out)?;
        Ok(sink)
    }

    /// Draws the report as a bordered text table sized by the runner's config.
    pub fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        self.render_with(TextTable::report(self.config.width), out)?;
        Ok(())
    }

    /// Renders to stdout and hands back the final statistics.
    pub fn finish(self) -> io::Result<RunStatistics> {
        let choice = if self.config.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(&mut stdout)?;
        Ok(self.stats)
    }
}

// ============================================================================
// CASE EVALUATION
// ============================================================================

fn evaluate(func: &dyn Callable, case: &RawCase, unpack: bool) -> Result<Evaluated, CaseError> {
    let normalized = normalize(case, unpack)?;
    let call = normalized.invocation.signature(func.name());

    let start = Instant::now();
    let actual = match guarded_call(func, &normalized.invocation) {
        Ok(value) => value,
        Err((cause, trace)) => {
            return Err(CaseError::CallFailure { call, cause, trace });
        }
    };
    let elapsed = start.elapsed().as_secs_f64();

    let outcome = if actual == normalized.expected {
        Outcome::Passed { actual }
    } else {
        Outcome::Failed {
            actual,
            expected: normalized.expected,
        }
    };
    Ok(Evaluated {
        call,
        elapsed,
        outcome,
    })
}

fn log_case_error(err: &CaseError) {
    if let Some(line) = route_case_error(err) {
        eprintln!("{}", line);
    }
}

/// Logs a case error through `tracing`. When no subscriber would record it,
/// the line is handed back for stderr instead.
fn route_case_error(err: &CaseError) -> Option<String> {
    let text = describe_case_error(err);
    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(code = err.code_name(), "{}", text);
        None
    } else {
        Some(format!("ERROR [{}] {}", err.code_name(), text))
    }
}

/// The full diagnostic for a case error: message, cause and trace.
pub(crate) fn describe_case_error(err: &CaseError) -> String {
    match err {
        CaseError::MalformedCase { .. } => err.to_string(),
        CaseError::CallFailure { cause, trace, .. } => match trace {
            Some(trace) => format!("{}: {}\n{}", err, cause, trace),
            None => format!("{}: {}", err, cause),
        },
    }
}

// ============================================================================
// FAILURE BOUNDARY
// ============================================================================

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Chains a panic hook that records the panic site and backtrace while a
/// guarded call is running on this thread, and defers to the previous hook
/// otherwise.
fn install_panic_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CAPTURING.with(Cell::get) {
                let trace = format!("{}\n{}", info, Backtrace::force_capture());
                PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            } else {
                previous(info);
            }
        }));
    });
}

/// Calls `func`, converting both returned errors and panics into a
/// `CallError`. Only panics carry a stack trace: a returned error has
/// already left the frame that built it.
fn guarded_call(
    func: &dyn Callable,
    invocation: &Invocation,
) -> Result<Value, (CallError, Option<String>)> {
    install_panic_hook();
    CAPTURING.with(|c| c.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| func.call(invocation)));
    CAPTURING.with(|c| c.set(false));

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(cause)) => Err((cause, None)),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            let trace = PANIC_TRACE.with(|slot| slot.borrow_mut().take());
            Err((CallError::Panicked { message }, trace))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
