//! Ecore serializer for metamodel packages.
//!
//! Writes a [`Package`] as an `ecore:EPackage` document so that modelling
//! tools can load the `smm.xmi` instance document against it.

use crate::error::SerializeError;
use crate::model::uris::{ECORE, XMI, XSI};
use crate::model::{Class, Feature, FeatureKind, Package};
use crate::serializer::xml::XmlWriter;

/// Serializes a package to an Ecore XMI string.
///
/// # Errors
///
/// Returns [`SerializeError::UnrepresentableChar`] if a name or literal holds
/// a character XML 1.0 cannot represent.
pub fn to_ecore(package: &Package) -> Result<String, SerializeError> {
    let mut w = XmlWriter::with_prolog();
    let root_attrs = [
        ("xmi:version", "2.0".to_owned()),
        ("xmlns:xmi", XMI.to_owned()),
        ("xmlns:xsi", XSI.to_owned()),
        ("xmlns:ecore", ECORE.to_owned()),
        ("name", package.name.to_owned()),
        ("nsURI", package.ns_uri.to_owned()),
        ("nsPrefix", package.prefix.to_owned()),
    ];

    if package.classes.is_empty() {
        w.start(0, "ecore:EPackage", &root_attrs, true)?;
        return Ok(w.finish());
    }
    w.start(0, "ecore:EPackage", &root_attrs, false)?;
    for class in &package.classes {
        write_class(&mut w, class)?;
    }
    w.end(0, "ecore:EPackage");
    Ok(w.finish())
}

fn write_class(w: &mut XmlWriter, class: &Class) -> Result<(), SerializeError> {
    let mut attrs = vec![
        ("xsi:type", "ecore:EClass".to_owned()),
        ("name", class.name.to_owned()),
    ];
    if class.is_abstract {
        attrs.push(("abstract", "true".to_owned()));
    }
    if !class.super_types.is_empty() {
        let supers: Vec<String> = class.super_types.iter().map(|s| class_uri(s)).collect();
        attrs.push(("eSuperTypes", supers.join(" ")));
    }

    let leaf = class.features.is_empty();
    w.start(1, "eClassifiers", &attrs, leaf)?;
    if leaf {
        return Ok(());
    }
    for feature in &class.features {
        write_feature(w, feature)?;
    }
    w.end(1, "eClassifiers");
    Ok(())
}

fn write_feature(w: &mut XmlWriter, feature: &Feature) -> Result<(), SerializeError> {
    let mut attrs = Vec::new();
    match feature.kind {
        FeatureKind::Attribute(data_type) => {
            attrs.push(("xsi:type", "ecore:EAttribute".to_owned()));
            attrs.push(("name", feature.name.to_owned()));
            if feature.many {
                attrs.push(("upperBound", "-1".to_owned()));
            }
            attrs.push((
                "eType",
                format!("ecore:EDataType {ECORE}#//{}", data_type.ecore_name()),
            ));
            if let Some(default) = feature.default {
                attrs.push(("defaultValueLiteral", default.to_owned()));
            }
        }
        FeatureKind::Reference {
            target,
            containment,
        } => {
            attrs.push(("xsi:type", "ecore:EReference".to_owned()));
            attrs.push(("name", feature.name.to_owned()));
            if feature.many {
                attrs.push(("upperBound", "-1".to_owned()));
            }
            attrs.push(("eType", class_uri(target)));
            if containment {
                attrs.push(("containment", "true".to_owned()));
            }
        }
    }
    w.start(2, "eStructuralFeatures", &attrs, true)
}

fn class_uri(name: &str) -> String {
    format!("#//{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_class() {
        let smm = Package::smm();
        let ecore = to_ecore(smm).expect("serializable");
        for class in &smm.classes {
            assert!(
                ecore.contains(&format!("name=\"{}\"", class.name)),
                "Missing class {}",
                class.name
            );
        }
        assert_eq!(ecore.matches("xsi:type=\"ecore:EClass\"").count(), 8);
    }

    #[test]
    fn writes_inheritance_and_abstractness() {
        let ecore = to_ecore(Package::smm()).expect("serializable");
        assert!(ecore.contains(
            "name=\"AbstractMeasureElement\" abstract=\"true\"/>"
        ));
        assert!(ecore.contains("name=\"Measure\" eSuperTypes=\"#//AbstractMeasureElement\""));
    }

    #[test]
    fn writes_containment_and_bounds() {
        let ecore = to_ecore(Package::smm()).expect("serializable");
        assert!(ecore.contains(
            "name=\"observedMeasures\" upperBound=\"-1\" eType=\"#//ObservedMeasure\" containment=\"true\""
        ));
        assert!(ecore.contains(
            "<eStructuralFeatures xsi:type=\"ecore:EReference\" name=\"measure\" eType=\"#//Measure\"/>"
        ));
        assert!(ecore.contains("defaultValueLiteral=\"true\""));
    }
}
