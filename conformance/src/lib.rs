//! SMM conformance suite.
//!
//! Validates the metamodel, populated instance graphs and the XMI artifact
//! written by `smm-build`.
//!
//! # Conformance Scope
//!
//! | Component | Standard |
//! |-----------|----------|
//! | Metamodel | required classes, resolvable references, acyclic containment |
//! | Instance graph | one observation per frame, unique measures, no dangling handles |
//! | Scenarios | four reference telemetry runs with known graph shapes |
//! | XMI artifact | XMI 2.0 envelope, root ordering, resolvable `/<n>` references |
//!
//! # Entry Point
//!
//! ```no_run
//! use smm_conformance::{run_all, ConformancePaths};
//! use std::path::PathBuf;
//!
//! let paths = ConformancePaths {
//!     artifacts: PathBuf::from("public"),
//!     input: Some(PathBuf::from("run.json")),
//! };
//! let report = run_all(&paths).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Context;
use log::info;
use smm_metamodel::Package;
use smm_populate::{build_model, source};

pub mod fixtures;
pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

/// Paths used by the conformance runner.
#[derive(Debug, Clone)]
pub struct ConformancePaths {
    /// Directory containing built artifacts (`smm.xmi`, etc.)
    pub artifacts: PathBuf,
    /// Telemetry document the artifacts were built from. When set, it is
    /// re-populated and the resulting graph validated.
    pub input: Option<PathBuf>,
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Metamodel structure
/// 2. Reference scenarios A to D
/// 3. Instance graph of the input document (when given)
/// 4. XMI artifact
///
/// # Errors
///
/// Returns an error if the input document cannot be loaded or populated, or
/// an artifact cannot be read.
pub fn run_all(paths: &ConformancePaths) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    // 1. Metamodel (operates on the static package, no file I/O)
    report.extend(validators::metamodel::validate(Package::smm()));

    // 2. Scenarios
    report.extend(validators::scenarios::validate());

    // 3. Input graph
    if let Some(input) = &paths.input {
        let frames = source::load_frames_from_path(input)
            .with_context(|| format!("Failed to load frames from {}", input.display()))?;
        let frame_count = frames.len();
        let model = build_model(frames)
            .with_context(|| format!("Failed to populate {}", input.display()))?;
        report.extend(validators::model::validate(&model, Some(frame_count)));
    }

    // 4. XMI artifact
    report.extend(validators::xmi::validate(&paths.artifacts)?);

    info!(
        "conformance: {} checks, {} failures, {} warnings",
        report.results.len(),
        report.failure_count(),
        report.warning_count()
    );
    Ok(report)
}
