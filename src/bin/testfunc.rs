// testfunc command-line entry point.
// Usage: cargo run --bin testfunc -- demo [--no-color] [--width N] [--json]

use std::process::ExitCode;

fn main() -> miette::Result<ExitCode> {
    testfunc::cli::run()
}
