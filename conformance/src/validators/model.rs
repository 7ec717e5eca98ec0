//! Populated model validator.
//!
//! Checks the graph invariants of a model produced by a population run:
//! - One observation per input frame
//! - Measure names are unique (one measure per name)
//! - Every measure handle resolves into the measure set
//! - Every measure is referenced by at least one observed measure (warning)
//! - Observation times are finite
//! - Every measurement carries at least one attribute (warning)

use std::collections::HashSet;

use smm_metamodel::Model;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "model";

/// Validates a model. When `expected_frames` is given, the observation count
/// must match it.
pub fn validate(model: &Model, expected_frames: Option<usize>) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    if let Some(expected) = expected_frames {
        let actual = model.observation_count();
        if actual == expected {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("One observation per frame ({actual})"),
            ));
        } else {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("Wrong observation count: expected {expected}, got {actual}"),
            ));
        }
    }

    let mut names = HashSet::new();
    let duplicates: Vec<String> = model
        .measures
        .iter()
        .filter(|m| !names.insert(m.name.as_str()))
        .map(|m| format!("duplicate measure '{}'", m.name))
        .collect();
    report.check(
        VALIDATOR,
        format!("{} measures, all names unique", model.measures.len()),
        "Measure names are not unique",
        duplicates,
    );

    let mut referenced = vec![false; model.measures.len()];
    let mut dangling = Vec::new();
    let mut bare = 0usize;
    let mut bad_times = Vec::new();
    for (i, obs) in model.observations.iter().enumerate() {
        if !obs.when_observed.is_finite() {
            bad_times.push(format!("observation {i}: whenObserved = {}", obs.when_observed));
        }
        let handles = obs
            .observed_measures
            .iter()
            .map(|om| om.measure)
            .chain(obs.requested_measures.iter().copied());
        for id in handles {
            match referenced.get_mut(id.index()) {
                Some(flag) => *flag = true,
                None => dangling.push(format!(
                    "observation {i} references measure #{} of {}",
                    id.index(),
                    model.measures.len()
                )),
            }
        }
        bare += obs
            .observed_measures
            .iter()
            .flat_map(|om| om.measurements.iter())
            .filter(|m| m.attributes.is_empty())
            .count();
    }

    report.check(
        VALIDATOR,
        format!(
            "All {} measure references resolve",
            model.observed_measure_count()
        ),
        "Dangling measure references",
        dangling,
    );
    report.check(
        VALIDATOR,
        "All observation times are finite",
        "Non-finite observation times",
        bad_times,
    );

    let unreferenced: Vec<String> = model
        .measures
        .iter()
        .zip(&referenced)
        .filter(|(_, used)| !**used)
        .map(|(m, _)| m.name.clone())
        .collect();
    if unreferenced.is_empty() {
        report.push(TestResult::pass(VALIDATOR, "Every measure is observed"));
    } else {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            format!("{} measures are never observed", unreferenced.len()),
            unreferenced,
        ));
    }

    if bare == 0 {
        report.push(TestResult::pass(VALIDATOR, "Every measurement carries attributes"));
    } else {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("{bare} measurements carry no attributes"),
        ));
    }

    report
}
