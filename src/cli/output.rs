//! Handles all user-facing output for the CLI: the diagnostic log stream on
//! stderr and the JSON form of a finished run.

use crate::report::SummaryLine;
use crate::runner::RunStatistics;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Routes `tracing` events to stderr as `LEVEL message` lines.
///
/// `RUST_LOG` overrides the default `warn` filter. Calling this twice is
/// harmless; the second subscriber is simply not installed.
pub fn init_logging(use_colors: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_colors)
        .with_target(false)
        .without_time()
        .try_init();
}

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    #[serde(flatten)]
    pub stats: RunStatistics,
    pub passed: usize,
    pub summary: String,
    pub outcome: SummaryLine,
}

impl JsonReport {
    pub fn new(stats: RunStatistics) -> Self {
        let outcome = SummaryLine::from_stats(&stats);
        Self {
            stats,
            passed: stats.passed(),
            summary: outcome.to_string(),
            outcome,
        }
    }
}

/// Pretty-prints the run statistics as JSON on stdout.
pub fn print_json(stats: RunStatistics) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&JsonReport::new(stats))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_report_fields() {
        let stats = RunStatistics {
            total: 3,
            fail: 1,
            error: 1,
        };
        let json = serde_json::to_value(JsonReport::new(stats)).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["passed"], 1);
        assert_eq!(json["summary"], "total:3, passed:1, fail:1, error:1");
        assert_eq!(json["outcome"]["kind"], "mixed");
    }
}
