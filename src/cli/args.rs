//! Defines the command-line arguments and subcommands for the testfunc CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "testfunc",
    version,
    about = "Table-driven sanity checks for small functions."
)]
pub struct TestfuncArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the built-in demo batches and print the report.
    Demo(ReportArgs),
    /// List the builtin functions available to the demo.
    ListBuiltins,
}

/// Options controlling how the report is printed.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Disable terminal colors.
    #[arg(long)]
    pub no_color: bool,
    /// Maximum table width; defaults to the terminal width. 0 disables wrapping.
    #[arg(long)]
    pub width: Option<usize>,
    /// Print the run statistics as JSON instead of the table.
    #[arg(long)]
    pub json: bool,
}
