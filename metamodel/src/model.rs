//! Core metamodel schema types.
//!
//! These types describe the SMM vocabulary (classes, attributes, references)
//! as typed Rust data. The schema is fixed: instances are built once and
//! borrowed for the lifetime of the process. The top-level entry point is
//! [`Package::smm()`](crate::Package::smm).

use crate::error::SchemaError;

/// Primitive type of an attribute feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Text value (`EString`).
    String,
    /// Boolean value (`EBoolean`).
    Boolean,
    /// Single-precision float in the schema, stored as `f64` in instances (`EFloat`).
    Float,
}

impl DataType {
    /// Returns the Ecore data type name this type maps to.
    #[must_use]
    pub fn ecore_name(self) -> &'static str {
        match self {
            DataType::String => "EString",
            DataType::Boolean => "EBoolean",
            DataType::Float => "EFloat",
        }
    }
}

/// Whether a structural feature holds a primitive value or points at a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Primitive-valued attribute.
    Attribute(DataType),
    /// Class-valued reference.
    Reference {
        /// Name of the target class.
        target: &'static str,
        /// Whether the owner exclusively contains the referenced objects.
        containment: bool,
    },
}

/// A structural feature (attribute or reference) declared on a class.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature name as it appears in serialized documents (e.g. `"whenObserved"`).
    pub name: &'static str,
    /// Attribute or reference.
    pub kind: FeatureKind,
    /// Whether the feature is multi-valued (`upperBound = -1`).
    pub many: bool,
    /// Default literal, if the schema declares one.
    pub default: Option<&'static str>,
}

impl Feature {
    /// Returns `true` for containment references.
    #[must_use]
    pub fn is_containment(&self) -> bool {
        matches!(self.kind, FeatureKind::Reference { containment: true, .. })
    }

    /// Returns the target class name for references, `None` for attributes.
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        match self.kind {
            FeatureKind::Reference { target, .. } => Some(target),
            FeatureKind::Attribute(_) => None,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone)]
pub struct Class {
    /// Class name (e.g. `"Observation"`).
    pub name: &'static str,
    /// Description.
    pub comment: &'static str,
    /// Abstract classes cannot be instantiated.
    pub is_abstract: bool,
    /// Names of direct super types.
    pub super_types: &'static [&'static str],
    /// Features declared directly on this class, in declaration order.
    pub features: Vec<Feature>,
}

impl Class {
    /// Looks up a feature declared directly on this class.
    #[must_use]
    pub fn find_feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }
}

/// A metamodel package: namespace metadata plus its classes.
#[derive(Debug)]
pub struct Package {
    /// Package name (e.g. `"smm"`).
    pub name: &'static str,
    /// Namespace URI used in serialized documents.
    pub ns_uri: &'static str,
    /// Namespace prefix used in serialized documents.
    pub prefix: &'static str,
    /// All classes in declaration order.
    pub classes: Vec<Class>,
}

impl Package {
    /// Looks up a class by name. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Looks up a class by name, failing if the package does not declare it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingClass`] if no class has that name.
    pub fn require_class(&self, name: &str) -> Result<&Class, SchemaError> {
        self.find_class(name).ok_or_else(|| SchemaError::MissingClass {
            package: self.name.to_owned(),
            class: name.to_owned(),
        })
    }

    /// Returns the number of classes in this package.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the number of features declared across all classes.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.classes.iter().map(|c| c.features.len()).sum()
    }

    /// Returns `true` if `class` is `ancestor` or inherits from it.
    #[must_use]
    pub fn is_subtype(&self, class: &str, ancestor: &str) -> bool {
        if class == ancestor {
            return true;
        }
        let mut pending: Vec<&str> = vec![class];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(name) = pending.pop() {
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            if let Some(c) = self.find_class(name) {
                for sup in c.super_types {
                    if *sup == ancestor {
                        return true;
                    }
                    pending.push(sup);
                }
            }
        }
        false
    }

    /// Returns every feature visible on `class`: inherited features first,
    /// then the class's own, in declaration order.
    #[must_use]
    pub fn all_features(&self, class: &str) -> Vec<&Feature> {
        let mut out = Vec::new();
        self.collect_features(class, &mut out, &mut Vec::new());
        out
    }

    fn collect_features<'a>(
        &'a self,
        class: &str,
        out: &mut Vec<&'a Feature>,
        visited: &mut Vec<&'a str>,
    ) {
        let Some(c) = self.find_class(class) else {
            return;
        };
        if visited.contains(&c.name) {
            return;
        }
        visited.push(c.name);
        for sup in c.super_types {
            self.collect_features(sup, out, visited);
        }
        out.extend(c.features.iter());
    }
}

/// Namespace URIs used by the serializers.
pub mod uris {
    /// XMI namespace.
    pub const XMI: &str = "http://www.omg.org/XMI";
    /// XML Schema instance namespace.
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    /// Ecore namespace.
    pub const ECORE: &str = "http://www.eclipse.org/emf/2002/Ecore";
    /// SMM package namespace.
    pub const SMM: &str = "http://example.org/smm";
}

#[cfg(test)]
mod tests {
    use crate::Package;

    #[test]
    fn measure_is_abstract_measure_element() {
        let smm = Package::smm();
        assert!(smm.is_subtype("Measure", "AbstractMeasureElement"));
        assert!(smm.is_subtype("Measure", "Measure"));
        assert!(!smm.is_subtype("Observation", "AbstractMeasureElement"));
    }

    #[test]
    fn require_class_reports_missing_name() {
        let err = Package::smm()
            .require_class("Gauge")
            .expect_err("Gauge is not an SMM class");
        assert_eq!(err.to_string(), "package 'smm' does not declare class 'Gauge'");
    }

    #[test]
    fn measure_features_include_name_and_source() {
        let names: Vec<&str> = Package::smm()
            .all_features("Measure")
            .iter()
            .map(|f| f.name)
            .collect();
        assert!(names.contains(&"name"));
        assert!(names.contains(&"source"));
    }

    #[test]
    fn containment_flag_is_exposed() {
        let smm = Package::smm();
        let om = smm.require_class("ObservedMeasure").expect("declared");
        let measure = om.find_feature("measure").expect("declared");
        assert!(!measure.is_containment());
        assert_eq!(measure.target(), Some("Measure"));
        let measurements = om.find_feature("measurements").expect("declared");
        assert!(measurements.is_containment());
        assert!(measurements.many);
    }
}
