//! The testfunc command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use crate::cli::args::{Command, ReportArgs, TestfuncArgs};
use crate::report::ReportConfig;
use crate::runner::TestRunner;
use clap::Parser;
use miette::IntoDiagnostic;
use std::process::ExitCode;

pub mod args;
pub mod demo;
pub mod output;

const BUILTINS: [(&str, &str); 4] = [
    ("abs", "absolute value of a number"),
    ("divmod", "floor quotient and remainder as a tuple"),
    ("split", "split a string on whitespace or a separator"),
    ("describe", "report how (a, b=\"b\", *args, **kw) were bound"),
];

/// The main entry point for the CLI.
pub fn run() -> miette::Result<ExitCode> {
    let args = TestfuncArgs::parse();

    // Dispatch to the appropriate subcommand handler.
    match args.command {
        Command::Demo(report) => handle_demo(&report),
        Command::ListBuiltins => {
            for (name, about) in BUILTINS {
                println!("{:<10} {}", name, about);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Handles the `demo` subcommand.
fn handle_demo(report: &ReportArgs) -> miette::Result<ExitCode> {
    let mut config = ReportConfig::default();
    if report.no_color {
        config.use_colors = false;
    }
    if let Some(width) = report.width {
        config.width = Some(width);
    }
    output::init_logging(config.use_colors && atty::is(atty::Stream::Stderr));

    let mut runner = TestRunner::new(config);
    demo::run_demo(&mut runner);

    let stats = if report.json {
        let stats = runner.stats();
        output::print_json(stats).into_diagnostic()?;
        stats
    } else {
        runner.finish().into_diagnostic()?
    };

    Ok(if stats.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
