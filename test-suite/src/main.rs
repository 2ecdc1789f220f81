//! Test suite runner. Prints every failing case with its mismatch, then a
//! pass count.

use clap::Parser;
use test_suite::{TestRunner, cases_dir};

#[derive(Parser)]
#[command(name = "test-suite", about = "Stratiform test suite runner")]
struct Args {
    /// Filter tests by name pattern (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Show only the first line of each failure
    #[arg(short, long)]
    short: bool,
}

/// ANSI color codes
mod colors {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

fn main() {
    let args = Args::parse();
    std::process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    let mut runner = TestRunner::new(cases_dir());
    if let Some(filter) = &args.filter {
        runner = runner.with_filter(filter.clone());
    }

    let results = match runner.run_all() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{}{}Error:{} {e:#}", colors::BOLD, colors::RED, colors::RESET);
            return 1;
        }
    };

    for failure in &results.failures {
        println!("{}FAIL{} {}", colors::RED, colors::RESET, failure.test_name);
        let detail = if args.short {
            failure.error.lines().next().unwrap_or_default()
        } else {
            failure.error.as_str()
        };
        for line in detail.lines() {
            println!("    {line}");
        }
    }

    let color = if results.is_success() {
        colors::GREEN
    } else {
        colors::RED
    };
    println!(
        "\n{}{color}{}/{} passed{}",
        colors::BOLD,
        results.passed,
        results.total,
        colors::RESET
    );
    i32::from(!results.is_success())
}
