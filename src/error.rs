use crate::callable::CallError;
use miette::Diagnostic;
use thiserror::Error;

/// Reasons a case ends up counted as an error instead of a pass or fail.
///
/// Neither variant ever escapes a batch: the runner logs it, bumps the error
/// counter and moves on to the next case.
#[derive(Error, Diagnostic, Debug)]
pub enum CaseError {
    #[error("test data could not be recognized: {case} ({reason})")]
    #[diagnostic(
        code(testfunc::malformed_case),
        help("a case is (args, expected) or (args, kwargs, expected)")
    )]
    MalformedCase { case: String, reason: String },

    #[error("call function failed: {call}")]
    #[diagnostic(code(testfunc::call_failure))]
    CallFailure {
        call: String,
        #[source]
        cause: CallError,
        /// Stack trace captured at the failure site, when one was available.
        trace: Option<String>,
    },
}

impl CaseError {
    /// Stable diagnostic code, also usable without a miette handler.
    pub fn code_name(&self) -> &'static str {
        match self {
            CaseError::MalformedCase { .. } => "testfunc::malformed_case",
            CaseError::CallFailure { .. } => "testfunc::call_failure",
        }
    }
}
