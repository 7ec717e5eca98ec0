//! End-to-end scenario validator.
//!
//! Runs each telemetry fixture through loading, population and XMI
//! serialization, then checks the resulting graph against the expected
//! observation, measure and measurement counts.

use smm_metamodel::serializer::xmi::to_xmi;
use smm_metamodel::Model;
use smm_populate::{build_model, source};

use crate::fixtures;
use crate::report::{ConformanceReport, TestResult};

use super::{model, xmi};

const VALIDATOR: &str = "scenario";

/// Graph shape a scenario must produce.
#[derive(Debug, Clone, Copy)]
struct Expected {
    observations: usize,
    measures: usize,
    measurements: usize,
    attributes: usize,
}

/// Runs all four population scenarios.
pub fn validate() -> ConformanceReport {
    let mut report = ConformanceReport::new();

    run_scenario(
        "a_flat_scalars",
        fixtures::SCENARIO_A_FLAT_SCALARS,
        Expected {
            observations: 1,
            measures: 2,
            measurements: 2,
            attributes: 2,
        },
        &mut report,
    );
    run_scenario(
        "b_nested_group",
        fixtures::SCENARIO_B_NESTED_GROUP,
        Expected {
            observations: 1,
            measures: 1,
            measurements: 1,
            attributes: 3,
        },
        &mut report,
    );
    run_scenario(
        "c_shared_measure",
        fixtures::SCENARIO_C_SHARED_MEASURE,
        Expected {
            observations: 2,
            measures: 1,
            measurements: 2,
            attributes: 2,
        },
        &mut report,
    );
    run_scenario(
        "d_empty_run",
        fixtures::SCENARIO_D_EMPTY_RUN,
        Expected {
            observations: 0,
            measures: 0,
            measurements: 0,
            attributes: 0,
        },
        &mut report,
    );

    report
}

fn run_scenario(name: &str, document: &str, expected: Expected, report: &mut ConformanceReport) {
    let validator = format!("{VALIDATOR}/{name}");

    let frames = match serde_json::from_str(document)
        .map_err(smm_populate::PopulateError::from)
        .and_then(source::frames_from_document)
    {
        Ok(frames) => frames,
        Err(e) => {
            report.push(TestResult::fail(&validator, format!("Fixture did not load: {e}")));
            return;
        }
    };
    let frame_count = frames.len();

    let populated = match build_model(frames) {
        Ok(populated) => populated,
        Err(e) => {
            report.push(TestResult::fail(&validator, format!("Population failed: {e}")));
            return;
        }
    };

    report.check(
        &validator,
        format!(
            "{} observations, {} measures, {} measurements",
            expected.observations, expected.measures, expected.measurements
        ),
        "Unexpected graph shape",
        shape_mismatches(&populated, expected),
    );

    let mut graph = model::validate(&populated, Some(frame_count));
    let document = to_xmi(&populated)
        .map_err(anyhow::Error::from)
        .and_then(|text| xmi::validate_document(&text));
    let mut document_report = match document {
        Ok(r) => r,
        Err(e) => {
            report.push(TestResult::fail(&validator, format!("XMI check did not run: {e}")));
            ConformanceReport::new()
        }
    };
    for result in graph.results.iter_mut().chain(document_report.results.iter_mut()) {
        result.validator = format!("{validator}/{}", result.validator);
    }
    report.extend(graph);
    report.extend(document_report);
}

fn shape_mismatches(populated: &Model, expected: Expected) -> Vec<String> {
    [
        ("observations", populated.observation_count(), expected.observations),
        ("measures", populated.measures.len(), expected.measures),
        ("measurements", populated.measurement_count(), expected.measurements),
        ("attributes", populated.attribute_count(), expected.attributes),
    ]
    .into_iter()
    .filter(|(_, actual, wanted)| actual != wanted)
    .map(|(what, actual, wanted)| format!("{what}: expected {wanted}, got {actual}"))
    .collect()
}
