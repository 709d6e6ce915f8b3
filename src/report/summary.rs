use crate::runner::RunStatistics;
use serde::Serialize;
use std::fmt;

/// The closing line of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryLine {
    NoTests,
    AllPassed {
        total: usize,
    },
    Mixed {
        total: usize,
        passed: usize,
        fail: usize,
        error: usize,
    },
}

impl SummaryLine {
    pub fn from_stats(stats: &RunStatistics) -> Self {
        let RunStatistics { total, fail, error } = *stats;
        if total == 0 {
            SummaryLine::NoTests
        } else if fail + error == 0 {
            SummaryLine::AllPassed { total }
        } else {
            SummaryLine::Mixed {
                total,
                passed: stats.passed(),
                fail,
                error,
            }
        }
    }

    /// Rendered with warning styling.
    pub fn is_warning(&self) -> bool {
        matches!(self, SummaryLine::NoTests)
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::NoTests => write!(f, "0 test"),
            SummaryLine::AllPassed { total } => write!(f, "all {} test(s) passed", total),
            SummaryLine::Mixed {
                total,
                passed,
                fail,
                error,
            } => write!(
                f,
                "total:{}, passed:{}, fail:{}, error:{}",
                total, passed, fail, error
            ),
        }
    }
}
