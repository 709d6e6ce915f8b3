//! # Reporting
//!
//! Rows collected by the runner are drawn once, through a [`TableSink`],
//! followed by a one-line summary of the run statistics.
//!
//! - **`table`**: the `TableSink` trait and the bordered text table
//! - **`summary`**: the summary line, a pure function of the counters

use crate::runner::RunStatistics;
use crate::value::Value;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

pub mod summary;
pub mod table;

pub use summary::SummaryLine;
pub use table::{Cell, ColumnType, TableSink, TextTable};

pub const PASS_GLYPH: &str = "√";
pub const FAIL_GLYPH: &str = "×";

/// Column headers of the report table.
pub const HEADER: [&str; 5] = ["func", "time(s)", "result", "expect", "status"];
/// Declared column types, in [`HEADER`] order.
pub const COLUMN_TYPES: [ColumnType; 5] = [
    ColumnType::Text,
    ColumnType::Float,
    ColumnType::Text,
    ColumnType::Text,
    ColumnType::Text,
];

// ============================================================================
// ROWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Pass => PASS_GLYPH,
            Status::Fail => FAIL_GLYPH,
        }
    }
}

/// One line of the report: a case that was invoked and returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub call: String,
    pub elapsed: f64,
    pub result: Value,
    /// Only set when the case failed.
    pub expected: Option<Value>,
    pub status: Status,
}

impl ReportRow {
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.call.clone()),
            Cell::Float(self.elapsed),
            Cell::Text(self.result.to_string()),
            Cell::Text(
                self.expected
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            Cell::Text(self.status.glyph().to_string()),
        ]
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Layout and styling for the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Maximum table width in columns. `None` fits the terminal,
    /// `Some(0)` disables wrapping.
    pub width: Option<usize>,
    pub use_colors: bool,
}

impl ReportConfig {
    /// Uncolored output with a fixed width; 0 disables wrapping.
    pub fn plain(width: usize) -> Self {
        Self {
            width: Some(width),
            use_colors: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            width: None,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Draws `rows` through `sink`, then writes the summary line for `stats`.
pub fn render(
    rows: &[ReportRow],
    stats: &RunStatistics,
    sink: &mut dyn TableSink,
    out: &mut dyn WriteColor,
) -> io::Result<()> {
    for row in rows {
        sink.append(row.cells());
    }
    write_highlighted(out, &sink.draw())?;
    writeln!(out)?;

    let summary = SummaryLine::from_stats(stats);
    if summary.is_warning() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{}", summary)?;
        out.reset()?;
        writeln!(out)
    } else {
        writeln!(out, "{}", summary)
    }
}

/// Writes `text`, coloring pass glyphs green and fail glyphs red.
fn write_highlighted(out: &mut dyn WriteColor, text: &str) -> io::Result<()> {
    let mut rest = text;
    while let Some((idx, glyph, color)) = next_glyph(rest) {
        write!(out, "{}", &rest[..idx])?;
        out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(out, "{}", glyph)?;
        out.reset()?;
        rest = &rest[idx + glyph.len()..];
    }
    write!(out, "{}", rest)
}

fn next_glyph(text: &str) -> Option<(usize, &'static str, Color)> {
    let pass = text.find(PASS_GLYPH).map(|i| (i, PASS_GLYPH, Color::Green));
    let fail = text.find(FAIL_GLYPH).map(|i| (i, FAIL_GLYPH, Color::Red));
    match (pass, fail) {
        (Some(p), Some(f)) => Some(if p.0 < f.0 { p } else { f }),
        (p, f) => p.or(f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Buffer, NoColor};

    fn stats(total: usize, fail: usize, error: usize) -> RunStatistics {
        RunStatistics { total, fail, error }
    }

    fn row(status: Status) -> ReportRow {
        ReportRow {
            call: "abs(-1)".to_string(),
            elapsed: 0.0,
            result: Value::from(1),
            expected: (status == Status::Fail).then(|| Value::from(-1)),
            status,
        }
    }

    #[test]
    fn test_cells_follow_header_order() {
        let cells = row(Status::Fail).cells();
        assert_eq!(cells.len(), HEADER.len());
        assert_eq!(cells[3], Cell::Text("-1".to_string()));
        assert_eq!(cells[4], Cell::Text(FAIL_GLYPH.to_string()));
        assert_eq!(row(Status::Pass).cells()[3], Cell::Text(String::new()));
    }

    #[test]
    fn test_render_plain_output() {
        let mut out = NoColor::new(Vec::new());
        let mut table = TextTable::report(Some(0));
        render(&[row(Status::Pass)], &stats(1, 0, 0), &mut table, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("| abs(-1) |"));
        assert!(text.ends_with("all 1 test(s) passed\n"));
    }

    #[test]
    fn test_render_colors_glyphs() {
        let mut out = Buffer::ansi();
        let mut table = TextTable::report(Some(0));
        render(
            &[row(Status::Pass), row(Status::Fail)],
            &stats(2, 1, 0),
            &mut table,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b[32m√"));
        assert!(text.contains("\x1b[31m×"));
        assert!(text.contains("total:2, passed:1, fail:1, error:0"));
    }

    #[test]
    fn test_zero_tests_is_a_warning() {
        let mut out = Buffer::ansi();
        let mut table = TextTable::report(Some(0));
        render(&[], &stats(0, 0, 0), &mut table, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b[33m0 test"));
    }

    #[test]
    fn test_next_glyph_picks_earliest() {
        let text = format!("a{}b{}", FAIL_GLYPH, PASS_GLYPH);
        let (idx, glyph, _) = next_glyph(&text).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(glyph, FAIL_GLYPH);
    }
}
