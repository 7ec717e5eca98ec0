//! `smm` package: the subset of the Structured Metrics Metamodel used to
//! record simulation telemetry.
//!
//! An `Observation` records one point in time; it contains `ObservedMeasure`s,
//! each binding one shared `Measure` definition to the `Measurement`s taken
//! for it. Measurements carry their context and sampled values as tagged
//! `Attribute`s.

use crate::model::uris::SMM;
use crate::model::{Class, DataType, Feature, FeatureKind, Package};

/// The entity kinds a population run cannot proceed without.
pub const REQUIRED_CLASSES: [&str; 5] = [
    "Measure",
    "Observation",
    "ObservedMeasure",
    "Measurement",
    "Attribute",
];

/// Returns the `smm` package declaration.
#[must_use]
pub fn package() -> Package {
    Package {
        name: "smm",
        ns_uri: SMM,
        prefix: "smm",
        classes: classes(),
    }
}

fn classes() -> Vec<Class> {
    vec![
        Class {
            name: "AbstractMeasureElement",
            comment: "Common super type of everything an observation may request.",
            is_abstract: true,
            super_types: &[],
            features: vec![],
        },
        Class {
            name: "Observation",
            comment: "The measured values of one telemetry frame at one point in time.",
            is_abstract: false,
            super_types: &[],
            features: vec![
                attribute("observer", DataType::String),
                attribute("tool", DataType::String),
                // Seconds since the start of the run.
                attribute("whenObserved", DataType::Float),
                reference("requestedMeasures", "AbstractMeasureElement", true, false),
                reference("scopes", "ObservationScope", true, true),
                reference("observedMeasures", "ObservedMeasure", true, true),
            ],
        },
        Class {
            name: "ObservationScope",
            comment: "Identifies the data set an observation was taken from.",
            is_abstract: false,
            super_types: &[],
            features: vec![attribute("scopeUri", DataType::String)],
        },
        Class {
            name: "ObservedMeasure",
            comment: "Binds one measure to the measurements recorded for it \
                      within an observation.",
            is_abstract: false,
            super_types: &[],
            features: vec![
                reference("measure", "Measure", false, false),
                reference("measurements", "Measurement", true, true),
            ],
        },
        Class {
            name: "Measure",
            comment: "A named, reusable definition of what is being measured. \
                      One instance exists per distinct name within a run.",
            is_abstract: false,
            super_types: &["AbstractMeasureElement"],
            features: vec![
                attribute("name", DataType::String),
                attribute("measureLabelFormat", DataType::String),
                attribute("measurementLabelFormat", DataType::String),
                Feature {
                    name: "visible",
                    kind: FeatureKind::Attribute(DataType::Boolean),
                    many: false,
                    default: Some("true"),
                },
                attribute("source", DataType::String),
                attribute("scale", DataType::String),
                attribute("customScale", DataType::String),
            ],
        },
        Class {
            name: "Measurement",
            comment: "One recorded value instance.",
            is_abstract: false,
            super_types: &[],
            features: vec![
                attribute("breakValue", DataType::String),
                attribute("error", DataType::String),
                reference("measurand", "Element", false, false),
                reference("attributes", "Attribute", true, true),
                reference("observedMeasure", "ObservedMeasure", false, false),
            ],
        },
        Class {
            name: "Element",
            comment: "The thing being measured.",
            is_abstract: false,
            super_types: &[],
            features: vec![],
        },
        Class {
            name: "Attribute",
            comment: "A tagged key/value pair carrying context or a sampled value.",
            is_abstract: false,
            super_types: &[],
            features: vec![
                attribute("tag", DataType::String),
                attribute("value", DataType::String),
            ],
        },
    ]
}

fn attribute(name: &'static str, data_type: DataType) -> Feature {
    Feature {
        name,
        kind: FeatureKind::Attribute(data_type),
        many: false,
        default: None,
    }
}

fn reference(name: &'static str, target: &'static str, many: bool, containment: bool) -> Feature {
    Feature {
        name,
        kind: FeatureKind::Reference {
            target,
            containment,
        },
        many,
        default: None,
    }
}
