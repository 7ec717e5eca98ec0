//! Metamodel validator.
//!
//! Validates structural constraints on a metamodel package:
//! - The five entity kinds the mapper produces are declared
//! - `Measure` is an `AbstractMeasureElement`
//! - Super types and reference targets are known classes
//! - Containment references form no cycle between classes
//! - `ObservedMeasure.measure` is a cross reference, not a containment

use std::collections::HashMap;

use smm_metamodel::smm::REQUIRED_CLASSES;
use smm_metamodel::Package;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "metamodel";

/// Validates a metamodel package.
pub fn validate(package: &Package) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let missing: Vec<String> = REQUIRED_CLASSES
        .iter()
        .filter(|name| package.find_class(name).is_none())
        .map(|name| (*name).to_owned())
        .collect();
    report.check(
        VALIDATOR,
        format!("All {} required classes declared", REQUIRED_CLASSES.len()),
        "Required classes missing",
        missing,
    );

    if package.is_subtype("Measure", "AbstractMeasureElement") {
        report.push(TestResult::pass(
            VALIDATOR,
            "Measure specializes AbstractMeasureElement",
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            "Measure does not specialize AbstractMeasureElement",
        ));
    }

    let mut unknown = Vec::new();
    for class in &package.classes {
        for sup in class.super_types {
            if package.find_class(sup).is_none() {
                unknown.push(format!("{} extends unknown class {sup}", class.name));
            }
        }
        for feature in &class.features {
            if let Some(target) = feature.target() {
                if package.find_class(target).is_none() {
                    unknown.push(format!(
                        "{}.{} targets unknown class {target}",
                        class.name, feature.name
                    ));
                }
            }
        }
    }
    report.check(
        VALIDATOR,
        "All super types and reference targets resolve",
        "Unresolved class names",
        unknown,
    );

    report.check(
        VALIDATOR,
        "Containment references are acyclic",
        "Containment cycle between classes",
        containment_cycles(package),
    );

    let shared_measure = package
        .find_class("ObservedMeasure")
        .and_then(|c| c.find_feature("measure"))
        .map(|f| !f.is_containment());
    match shared_measure {
        Some(true) => report.push(TestResult::pass(
            VALIDATOR,
            "ObservedMeasure.measure is a cross reference",
        )),
        Some(false) => report.push(TestResult::fail(
            VALIDATOR,
            "ObservedMeasure.measure is a containment; shared measures would be moved",
        )),
        None => report.push(TestResult::fail(
            VALIDATOR,
            "ObservedMeasure.measure is not declared",
        )),
    }

    report
}

/// Returns one line per class that can reach itself through containment.
fn containment_cycles(package: &Package) -> Vec<String> {
    let edges: HashMap<&str, Vec<&str>> = package
        .classes
        .iter()
        .map(|class| {
            let targets = class
                .features
                .iter()
                .filter(|f| f.is_containment())
                .filter_map(|f| f.target())
                .collect();
            (class.name, targets)
        })
        .collect();

    let mut cycles = Vec::new();
    for class in &package.classes {
        let mut stack: Vec<&str> = edges.get(class.name).cloned().unwrap_or_default();
        let mut seen: Vec<&str> = Vec::new();
        while let Some(next) = stack.pop() {
            if next == class.name {
                cycles.push(format!("{} contains itself transitively", class.name));
                break;
            }
            if seen.contains(&next) {
                continue;
            }
            seen.push(next);
            if let Some(targets) = edges.get(next) {
                stack.extend(targets.iter().copied());
            }
        }
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use smm_metamodel::{Class, Feature, FeatureKind};

    fn class(name: &'static str, features: Vec<Feature>) -> Class {
        Class {
            name,
            comment: "",
            is_abstract: false,
            super_types: &[],
            features,
        }
    }

    fn contains(name: &'static str, target: &'static str) -> Feature {
        Feature {
            name,
            kind: FeatureKind::Reference {
                target,
                containment: true,
            },
            many: true,
            default: None,
        }
    }

    #[test]
    fn smm_package_passes() {
        let report = validate(Package::smm());
        let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
        assert!(failures.is_empty(), "Metamodel failures: {failures:#?}");
    }

    #[test]
    fn containment_cycles_are_detected() {
        let package = Package {
            name: "loop",
            ns_uri: "urn:loop",
            prefix: "l",
            classes: vec![
                class("A", vec![contains("bs", "B")]),
                class("B", vec![contains("as", "A")]),
            ],
        };
        let cycles = containment_cycles(&package);
        assert_eq!(cycles.len(), 2);
        assert!(!validate(&package).all_passed());
    }
}
