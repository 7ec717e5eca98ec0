//! `smm-conformance`: validates the SMM metamodel, the reference scenarios
//! and a built `smm.xmi` artifact.
//!
//! **Usage:**
//! ```
//! smm-conformance [--artifacts <path>] [--input <run.json>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use smm_conformance::{run_all, ConformancePaths, Severity};

/// Run the SMM conformance suite.
#[derive(Parser)]
#[command(
    name = "smm-conformance",
    about = "Validate the SMM metamodel and built artifacts"
)]
struct Args {
    /// Path to the built artifacts directory (default: public/).
    #[arg(long, default_value = "public")]
    artifacts: PathBuf,

    /// Telemetry document the artifacts were built from.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log validator progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let paths = ConformancePaths {
        artifacts: args.artifacts,
        input: args.input,
    };

    let report = run_all(&paths)?;

    // Print results
    println!("SMM Conformance Report");
    println!("======================");
    println!();

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut warned = 0usize;

    for result in &report.results {
        let status = match result.severity {
            Severity::Pass => {
                passed += 1;
                "PASS"
            }
            Severity::Warning => {
                warned += 1;
                "WARN"
            }
            Severity::Failure => {
                failed += 1;
                "FAIL"
            }
        };
        println!("[{status}] {}: {}", result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    println!();
    println!("Summary: {passed} passed, {warned} warnings, {failed} failed");

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
