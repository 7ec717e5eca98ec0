//! XMI 2.0 serializer for SMM models.
//!
//! Produces one `xmi:XMI` document whose root contents are every
//! [`Observation`] in model order followed by every [`Measure`]. Containment
//! is written as nested elements named after the containment feature.
//! Cross references (`ObservedMeasure.measure`, `Observation.requestedMeasures`)
//! are written as root-relative fragments: `/<n>` addresses the n-th root
//! element, so measure `i` of a model with `k` observations is `/<k + i>`.

use crate::error::SerializeError;
use crate::graph::{Measure, MeasureId, Measurement, Model, Observation};
use crate::model::uris::{XMI, XSI};
use crate::model::Package;
use crate::serializer::xml::{format_float, XmlWriter};

/// Serializes a model against the SMM package to an XMI string.
///
/// # Errors
///
/// Returns [`SerializeError::UnrepresentableChar`] if a string in the model
/// holds a character XML 1.0 cannot represent (most C0 control characters).
pub fn to_xmi(model: &Model) -> Result<String, SerializeError> {
    to_xmi_with(model, Package::smm())
}

/// Serializes a model to an XMI string, taking the namespace prefix and URI
/// from `package`.
///
/// # Errors
///
/// As [`to_xmi`].
pub fn to_xmi_with(model: &Model, package: &Package) -> Result<String, SerializeError> {
    let mut w = XmlWriter::with_prolog();

    let xmlns = format!("xmlns:{}", package.prefix);
    let root_attrs = [
        ("xmi:version", "2.0".to_owned()),
        ("xmlns:xmi", XMI.to_owned()),
        ("xmlns:xsi", XSI.to_owned()),
        (xmlns.as_str(), package.ns_uri.to_owned()),
    ];

    if model.observations.is_empty() && model.measures.is_empty() {
        w.start(0, "xmi:XMI", &root_attrs, true)?;
        return Ok(w.finish());
    }
    w.start(0, "xmi:XMI", &root_attrs, false)?;

    let refs = RootRefs {
        measure_base: model.observations.len(),
    };
    let observation_tag = format!("{}:Observation", package.prefix);
    let measure_tag = format!("{}:Measure", package.prefix);

    for observation in &model.observations {
        write_observation(&mut w, observation, &observation_tag, refs)?;
    }
    for measure in &model.measures {
        write_measure(&mut w, measure, &measure_tag)?;
    }

    w.end(0, "xmi:XMI");
    Ok(w.finish())
}

/// Maps measure handles to root fragments.
#[derive(Clone, Copy)]
struct RootRefs {
    measure_base: usize,
}

impl RootRefs {
    fn measure(self, id: MeasureId) -> String {
        format!("/{}", self.measure_base + id.index())
    }
}

fn write_observation(
    w: &mut XmlWriter,
    obs: &Observation,
    tag: &str,
    refs: RootRefs,
) -> Result<(), SerializeError> {
    let mut attrs = vec![
        ("observer", obs.observer.clone()),
        ("tool", obs.tool.clone()),
        ("whenObserved", format_float(obs.when_observed)),
    ];
    if !obs.requested_measures.is_empty() {
        let targets: Vec<String> = obs
            .requested_measures
            .iter()
            .map(|id| refs.measure(*id))
            .collect();
        attrs.push(("requestedMeasures", targets.join(" ")));
    }

    let leaf = obs.scopes.is_empty() && obs.observed_measures.is_empty();
    w.start(1, tag, &attrs, leaf)?;
    if leaf {
        return Ok(());
    }

    for scope in &obs.scopes {
        w.start(2, "scopes", &[("scopeUri", scope.scope_uri.clone())], true)?;
    }
    for observed in &obs.observed_measures {
        let leaf = observed.measurements.is_empty();
        w.start(
            2,
            "observedMeasures",
            &[("measure", refs.measure(observed.measure))],
            leaf,
        )?;
        if leaf {
            continue;
        }
        for measurement in &observed.measurements {
            write_measurement(w, measurement)?;
        }
        w.end(2, "observedMeasures");
    }
    w.end(1, tag);
    Ok(())
}

fn write_measurement(w: &mut XmlWriter, measurement: &Measurement) -> Result<(), SerializeError> {
    let mut attrs = Vec::new();
    if let Some(break_value) = &measurement.break_value {
        attrs.push(("breakValue", break_value.clone()));
    }
    if let Some(error) = &measurement.error {
        attrs.push(("error", error.clone()));
    }

    let leaf = measurement.attributes.is_empty();
    w.start(3, "measurements", &attrs, leaf)?;
    if leaf {
        return Ok(());
    }
    for attribute in &measurement.attributes {
        w.start(
            4,
            "attributes",
            &[("tag", attribute.tag.clone()), ("value", attribute.value.clone())],
            true,
        )?;
    }
    w.end(3, "measurements");
    Ok(())
}

fn write_measure(w: &mut XmlWriter, measure: &Measure, tag: &str) -> Result<(), SerializeError> {
    // Schema feature order; `visible` only when it differs from its default.
    let mut attrs = vec![("name", measure.name.clone())];
    if let Some(format) = &measure.measure_label_format {
        attrs.push(("measureLabelFormat", format.clone()));
    }
    if let Some(format) = &measure.measurement_label_format {
        attrs.push(("measurementLabelFormat", format.clone()));
    }
    if !measure.visible {
        attrs.push(("visible", "false".to_owned()));
    }
    attrs.push(("source", measure.source.clone()));
    attrs.push(("scale", measure.scale.clone()));
    if let Some(custom) = &measure.custom_scale {
        attrs.push(("customScale", custom.clone()));
    }
    w.start(1, tag, &attrs, true)
}
