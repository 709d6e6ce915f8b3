//! Rendering of the collected report.

use termcolor::NoColor;
use testfunc::builtins::{ABS, SPLIT};
use testfunc::report::{Cell, TableSink, FAIL_GLYPH, PASS_GLYPH};
use testfunc::{list, BatchOptions, RawCase, ReportConfig, TestRunner};

fn render(runner: &TestRunner) -> String {
    let mut out = NoColor::new(Vec::new());
    runner.render(&mut out).unwrap();
    String::from_utf8(out.into_inner()).unwrap()
}

/// Collects appended rows instead of drawing a table.
#[derive(Default)]
struct RecordingSink {
    rows: Vec<Vec<Cell>>,
}

impl TableSink for RecordingSink {
    fn append(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn draw(&self) -> String {
        format!("{} rows", self.rows.len())
    }
}

#[test]
fn empty_run_reports_zero_tests() {
    let runner = TestRunner::new(ReportConfig::plain(0));
    let text = render(&runner);
    assert!(text.contains("| func | time(s) | result | expect | status |"));
    assert!(text.ends_with("0 test\n"));
}

#[test]
fn passing_run_shows_rows_and_summary() {
    let mut runner = TestRunner::new(ReportConfig::plain(0));
    runner.run_batch(
        &SPLIT,
        [("hello world", list!["hello", "world"])],
        &BatchOptions::default(),
    );
    let text = render(&runner);
    assert!(text.contains(r#"split("hello world")"#));
    assert!(text.contains(r#"["hello", "world"]"#));
    assert!(text.contains(PASS_GLYPH));
    assert!(text.ends_with("all 1 test(s) passed\n"));
}

#[test]
fn failing_run_shows_expected_value() {
    let mut runner = TestRunner::new(ReportConfig::plain(0));
    runner.run_batch(&ABS, [(-1, -1), (2, 2)], &BatchOptions::default());
    runner.run_batch(&ABS, [RawCase::default()], &BatchOptions::default());
    let text = render(&runner);
    let fail_line = text
        .lines()
        .find(|l| l.contains(FAIL_GLYPH))
        .expect("a failed row");
    assert!(fail_line.contains("abs(-1)"));
    assert!(fail_line.contains("| -1 "));
    assert!(text.ends_with("total:3, passed:1, fail:1, error:1\n"));
}

#[test]
fn rendering_is_repeatable() {
    let mut runner = TestRunner::new(ReportConfig::plain(0));
    runner.run_batch(&ABS, [(-3, 3)], &BatchOptions::default());
    let first = render(&runner);
    let second = render(&runner);
    // Rows keep their measured time, so a second render is byte-identical.
    assert_eq!(first, second);
}

#[test]
fn narrow_width_wraps_the_table() {
    let mut runner = TestRunner::new(ReportConfig::plain(60));
    runner.run_batch(
        &SPLIT,
        [("a fairly long sentence to split", list!["a", "fairly", "long", "sentence", "to", "split"])],
        &BatchOptions::default(),
    );
    let text = render(&runner);
    let table_lines = text.lines().filter(|l| l.starts_with('+') || l.starts_with('|'));
    for line in table_lines {
        assert!(line.chars().count() <= 60, "too wide: {line}");
    }
}

#[test]
fn custom_sink_receives_every_row() {
    let mut runner = TestRunner::new(ReportConfig::plain(0));
    runner.run_batch(&ABS, [(1, 1), (-1, 2)], &BatchOptions::default());
    let mut out = NoColor::new(Vec::new());
    let sink = runner
        .render_with(RecordingSink::default(), &mut out)
        .unwrap();
    assert_eq!(sink.rows.len(), 2);
    assert_eq!(sink.rows[1][4], Cell::Text(FAIL_GLYPH.to_string()));
    let text = String::from_utf8(out.into_inner()).unwrap();
    assert!(text.starts_with("2 rows\n"));
}

#[test]
fn each_render_fills_its_own_sink() {
    let mut runner = TestRunner::new(ReportConfig::plain(0));
    runner.run_batch(&ABS, [(1, 1), (-1, 1)], &BatchOptions::default());
    let mut out = NoColor::new(Vec::new());
    let first = runner
        .render_with(RecordingSink::default(), &mut out)
        .unwrap();
    let second = runner
        .render_with(RecordingSink::default(), &mut out)
        .unwrap();
    assert_eq!(first.rows, second.rows);
    assert_eq!(second.rows.len(), 2);
}
