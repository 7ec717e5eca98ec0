//! SMM metamodel encoded as typed Rust data.
//!
//! The `smm-metamodel` crate provides the measurement metamodel (8 classes,
//! one inheritance relation, containment and cross references) as static
//! Rust data, the typed instance graph that population runs produce, and
//! serializers for XMI, JSON, and Ecore.
//!
//! # Entry Point
//!
//! ```
//! let smm = smm_metamodel::Package::smm();
//! assert_eq!(smm.class_count(), 8);
//! assert!(smm.require_class("Observation").is_ok());
//! ```
//!
//! # Serialization
//!
//! ```
//! let model = smm_metamodel::Model::default();
//! let xmi = smm_metamodel::serializer::xmi::to_xmi(&model).expect("plain text");
//! let ecore = smm_metamodel::serializer::ecore::to_ecore(smm_metamodel::Package::smm())
//!     .expect("plain text");
//! assert!(xmi.contains("xmi:XMI"));
//! assert!(ecore.contains("ecore:EPackage"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod graph;
pub mod model;
pub mod serializer;
pub mod smm;

pub use error::{SchemaError, SerializeError};
pub use graph::{
    Attribute, Measure, MeasureId, Measurement, Model, Observation, ObservationScope,
    ObservedMeasure,
};
pub use model::{Class, DataType, Feature, FeatureKind, Package};

impl Package {
    /// Returns the SMM package declaration.
    ///
    /// Built once on first use and shared for the rest of the process.
    #[must_use]
    pub fn smm() -> &'static Package {
        static SMM: std::sync::OnceLock<Package> = std::sync::OnceLock::new();
        SMM.get_or_init(smm::package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_count() {
        assert_eq!(Package::smm().class_count(), 8);
    }

    #[test]
    fn feature_count() {
        // Observation 6, ObservationScope 1, ObservedMeasure 2, Measure 7,
        // Measurement 5, Attribute 2.
        assert_eq!(Package::smm().feature_count(), 23);
    }

    #[test]
    fn required_classes_resolve() {
        for name in smm::REQUIRED_CLASSES {
            assert!(
                Package::smm().require_class(name).is_ok(),
                "Missing required class: {name}"
            );
        }
    }

    #[test]
    fn all_class_names_unique() {
        let mut names = std::collections::HashSet::new();
        for class in &Package::smm().classes {
            assert!(names.insert(class.name), "Duplicate class: {}", class.name);
        }
    }

    #[test]
    fn all_reference_targets_resolve() {
        let smm = Package::smm();
        for class in &smm.classes {
            for feature in &class.features {
                if let Some(target) = feature.target() {
                    assert!(
                        smm.find_class(target).is_some(),
                        "{}.{} targets unknown class {target}",
                        class.name,
                        feature.name
                    );
                }
            }
        }
    }

    #[test]
    fn abstract_measure_element_is_abstract() {
        let class = Package::smm()
            .require_class("AbstractMeasureElement")
            .expect("declared");
        assert!(class.is_abstract);
        assert!(class.features.is_empty());
    }
}
