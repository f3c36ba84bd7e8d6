//! Runs every golden case and reports one line per case:
//! - expr-both 2/2 PASS
//! - duplicate-variant 1/2 FAIL

use std::sync::mpsc;

use clap::Parser;
use rayon::prelude::*;
use test_suite::{CaseResult, collect_cases};

#[derive(Parser)]
#[command(name = "test-suite", about = "astgen golden case runner")]
struct Args {
    /// Filter cases by name (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Show one-line failure summaries instead of diffs
    #[arg(short, long)]
    short: bool,
}

mod colors {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

enum CaseOutcome {
    Ran { name: String, result: CaseResult },
    LoadError { name: String, error: String },
}

impl CaseOutcome {
    fn name(&self) -> &str {
        match self {
            CaseOutcome::Ran { name, .. } | CaseOutcome::LoadError { name, .. } => name,
        }
    }
}

fn main() {
    let args = Args::parse();
    std::process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    println!("\n{}{}astgen golden cases{}", colors::BOLD, colors::CYAN, colors::RESET);
    println!("{}{}{}\n", colors::DIM, "=".repeat(50), colors::RESET);

    let cases = match collect_cases() {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("{}{}Error:{} {e}", colors::BOLD, colors::RED, colors::RESET);
            return 1;
        }
    };

    let cases: Vec<_> = cases
        .into_iter()
        .filter(|case| {
            let Some(filter) = &args.filter else {
                return true;
            };
            match case {
                Ok(case) => case.name.contains(filter.as_str()),
                Err(e) => e.path().to_string_lossy().contains(filter.as_str()),
            }
        })
        .collect();

    if cases.is_empty() {
        println!(
            "{}{}Warning:{} No cases found{}",
            colors::BOLD,
            colors::YELLOW,
            colors::RESET,
            if args.filter.is_some() { " matching filter" } else { "" }
        );
        return 0;
    }

    let (tx, rx) = mpsc::channel();
    cases.par_iter().for_each_with(tx, |tx, case| {
        let outcome = match case {
            Ok(case) => CaseOutcome::Ran {
                name: case.name.clone(),
                result: case.run(),
            },
            Err(e) => CaseOutcome::LoadError {
                name: e.path().display().to_string(),
                error: e.to_string(),
            },
        };
        // The receiver outlives every sender.
        let _ = tx.send(outcome);
    });
    let mut outcomes: Vec<CaseOutcome> = rx.iter().collect();
    outcomes.sort_by(|a, b| a.name().cmp(b.name()));

    let mut passed = 0;
    let mut failed = 0;
    for outcome in &outcomes {
        match outcome {
            CaseOutcome::Ran { name, result } => {
                let (status, color) = if result.all_passed() {
                    passed += 1;
                    ("PASS", colors::GREEN)
                } else {
                    failed += 1;
                    ("FAIL", colors::RED)
                };
                println!(
                    "  {name} {}/{} {}{color}{status}{}",
                    result.passed_count(),
                    result.total_count(),
                    colors::BOLD,
                    colors::RESET
                );
            }
            CaseOutcome::LoadError { name, .. } => {
                failed += 1;
                println!("  {}{}LOAD ERROR{} {name}", colors::BOLD, colors::RED, colors::RESET);
            }
        }
    }

    if failed > 0 {
        println!("\n{}{}Failures{}", colors::BOLD, colors::RED, colors::RESET);
        for outcome in &outcomes {
            match outcome {
                CaseOutcome::Ran { name, result } => {
                    for check in result.failed_checks() {
                        println!("\n  {}{name} / {}{}", colors::BOLD, check.name, colors::RESET);
                        println!("    {}", check.result.summary());
                        if !args.short
                            && let Some(diff) = check.result.diff()
                        {
                            println!("{}{diff}{}", colors::DIM, colors::RESET);
                        }
                    }
                }
                CaseOutcome::LoadError { name, error } => {
                    println!("\n  {}{name}{}", colors::BOLD, colors::RESET);
                    println!("    {error}");
                }
            }
        }
    }

    println!(
        "\n{}Summary:{} {}{passed} passed{}, {}{failed} failed{}",
        colors::BOLD,
        colors::RESET,
        colors::GREEN,
        colors::RESET,
        if failed > 0 { colors::RED } else { colors::DIM },
        colors::RESET
    );

    if failed > 0 { 1 } else { 0 }
}
