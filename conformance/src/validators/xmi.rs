//! XMI artifact validator.
//!
//! Verifies that `smm.xmi` is a well-formed SMM interchange document:
//! - XML prolog and an `xmi:XMI` root with the XMI and SMM namespaces bound
//! - Only characters of the XML 1.0 `Char` production appear
//! - Root contents are observations followed by measures
//! - Every `measure` / `requestedMeasures` fragment (`/<n>`) addresses a
//!   root `smm:Measure` element
//! - The root element is closed

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use smm_metamodel::model::uris::{SMM, XMI};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "artifact/xmi";

/// File name of the XMI artifact inside the artifacts directory.
pub const XMI_FILE: &str = "smm.xmi";

const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Validates `smm.xmi` in the artifacts directory.
///
/// # Errors
///
/// Returns an error if the artifact exists but cannot be read.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let path = artifacts.join(XMI_FILE);
    if !path.exists() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{XMI_FILE} not found in artifacts directory"),
        ));
        return Ok(report);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    validate_document(&content)
}

/// Validates the text of an XMI document.
///
/// # Errors
///
/// Returns an error only if an internal pattern fails to compile.
pub fn validate_document(xmi: &str) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    if xmi.starts_with(PROLOG) {
        report.push(TestResult::pass(VALIDATOR, "XML prolog present"));
    } else {
        report.push(TestResult::fail(VALIDATOR, "Missing XML prolog"));
    }

    report.check(
        VALIDATOR,
        "Document holds only XML 1.0 characters",
        "Document holds characters XML 1.0 cannot represent",
        non_xml_chars(xmi),
    );

    let root = Regex::new(r"<xmi:XMI\b([^>]*?)(/?)>").context("root pattern")?;
    let Some(root_match) = root.captures(xmi) else {
        report.push(TestResult::fail(VALIDATOR, "No xmi:XMI root element"));
        return Ok(report);
    };
    let root_attrs = root_match.get(1).map_or("", |m| m.as_str());
    let self_closed = root_match.get(2).is_some_and(|m| !m.as_str().is_empty());

    let missing: Vec<String> = [
        "xmi:version=\"2.0\"".to_owned(),
        format!("xmlns:xmi=\"{XMI}\""),
        format!("xmlns:smm=\"{SMM}\""),
    ]
    .into_iter()
    .filter(|decl| !root_attrs.contains(decl.as_str()))
    .collect();
    report.check(
        VALIDATOR,
        "Root declares XMI version and namespaces",
        "Root is missing declarations",
        missing,
    );

    if self_closed || xmi.trim_end().ends_with("</xmi:XMI>") {
        report.push(TestResult::pass(VALIDATOR, "Root element is closed"));
    } else {
        report.push(TestResult::fail(VALIDATOR, "Root element is never closed"));
    }

    let root_element = Regex::new(r"(?m)^  <([A-Za-z_][\w.-]*:[A-Za-z_][\w.-]*)[\s/>]")
        .context("root element pattern")?;
    let roots: Vec<&str> = root_element
        .captures_iter(xmi)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    check_root_order(&roots, &mut report);

    let reference = Regex::new(r#"\b(measure|requestedMeasures)="([^"]*)""#)
        .context("reference pattern")?;
    let mut broken = Vec::new();
    let mut count = 0usize;
    for caps in reference.captures_iter(xmi) {
        let feature = caps.get(1).map_or("", |m| m.as_str());
        let targets = caps.get(2).map_or("", |m| m.as_str());
        for target in targets.split_whitespace() {
            count += 1;
            let resolved = target
                .strip_prefix('/')
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| roots.get(n));
            match resolved {
                Some(&"smm:Measure") => {}
                Some(other) => broken.push(format!("{feature}=\"{target}\" points at {other}")),
                None => broken.push(format!("{feature}=\"{target}\" does not resolve")),
            }
        }
    }
    report.check(
        VALIDATOR,
        format!("All {count} measure references resolve to root measures"),
        "Unresolvable measure references",
        broken,
    );

    Ok(report)
}

/// One line per character outside the XML 1.0 `Char` production.
fn non_xml_chars(xmi: &str) -> Vec<String> {
    xmi.lines()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|(_, c)| {
                    !matches!(
                        c,
                        '\t' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
                    )
                })
                .map(move |(col, c)| {
                    format!("line {}, column {}: U+{:04X}", row + 1, col + 1, u32::from(c))
                })
        })
        .collect()
}

fn check_root_order(roots: &[&str], report: &mut ConformanceReport) {
    let observations = roots.iter().filter(|r| **r == "smm:Observation").count();
    let measures = roots.iter().filter(|r| **r == "smm:Measure").count();
    let others: Vec<String> = roots
        .iter()
        .filter(|r| **r != "smm:Observation" && **r != "smm:Measure")
        .map(|r| format!("unexpected root element {r}"))
        .collect();
    report.check(
        VALIDATOR,
        format!("{observations} observations and {measures} measures at the root"),
        "Unexpected root contents",
        others,
    );

    let first_measure = roots.iter().position(|r| *r == "smm:Measure");
    let last_observation = roots.iter().rposition(|r| *r == "smm:Observation");
    match (first_measure, last_observation) {
        (Some(m), Some(o)) if o > m => report.push(TestResult::fail(
            VALIDATOR,
            "Observations appear after measures at the root",
        )),
        _ => report.push(TestResult::pass(
            VALIDATOR,
            "Root contents are observations followed by measures",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smm_metamodel::serializer::xmi::to_xmi;
    use smm_populate::{build_model, Frame};

    fn document() -> String {
        let frames = vec![
            Frame::new(json!({ "time": 0.5, "sensors": { "_data": {
                "speed": 3.0,
                "wheelThermals": { "RL": { "core": 40.0 } }
            } } })),
            Frame::new(json!({ "time": 1.0, "sensors": { "_data": { "speed": 4.0 } } })),
        ];
        to_xmi(&build_model(frames).expect("mapped")).expect("serializable")
    }

    #[test]
    fn serialized_model_passes() {
        let report = validate_document(&document()).expect("patterns compile");
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn empty_document_passes() {
        let xmi = to_xmi(&smm_metamodel::Model::default()).expect("serializable");
        let report = validate_document(&xmi).expect("patterns compile");
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn reference_to_an_observation_fails() {
        let xmi = document().replacen("measure=\"/2\"", "measure=\"/0\"", 1);
        let report = validate_document(&xmi).expect("patterns compile");
        assert_eq!(report.failure_count(), 1, "{:#?}", report.results);
    }

    #[test]
    fn out_of_range_reference_fails() {
        let xmi = document().replacen("measure=\"/2\"", "measure=\"/99\"", 1);
        let report = validate_document(&xmi).expect("patterns compile");
        assert!(!report.all_passed());
    }

    #[test]
    fn truncated_document_fails() {
        let xmi = document().replace("</xmi:XMI>", "");
        let report = validate_document(&xmi).expect("patterns compile");
        assert!(!report.all_passed());
    }

    #[test]
    fn control_character_in_foreign_document_fails() {
        let xmi = document().replacen("tag=\"speed\"", "tag=\"spe\u{1}ed\"", 1);
        let report = validate_document(&xmi).expect("patterns compile");
        assert_eq!(report.failure_count(), 1, "{:#?}", report.results);
        let failure = report.results.iter().find(|r| r.is_failure()).expect("failure");
        assert_eq!(failure.details.len(), 1);
        assert!(failure.details[0].ends_with("U+0001"), "{}", failure.details[0]);
    }

    #[test]
    fn missing_artifact_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = validate(dir.path()).expect("readable");
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn written_artifact_is_validated() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(XMI_FILE), document()).expect("write");
        let report = validate(dir.path()).expect("readable");
        assert!(report.all_passed(), "{:#?}", report.results);
    }
}
