//! Demonstrates loading the SMM metamodel and serializing it.
//!
//! Run with: `cargo run --example dump_metamodel -p smm-metamodel`

use smm_metamodel::{FeatureKind, Package, SerializeError};

fn main() -> Result<(), SerializeError> {
    let smm = Package::smm();

    println!("SMM package '{}' ({})", smm.name, smm.ns_uri);
    println!("  Classes:   {}", smm.class_count());
    println!("  Features:  {}", smm.feature_count());
    println!();

    for class in &smm.classes {
        let containments = class.features.iter().filter(|f| f.is_containment()).count();
        let attributes = class
            .features
            .iter()
            .filter(|f| matches!(f.kind, FeatureKind::Attribute(_)))
            .count();
        println!(
            "  {:24} {:>2} attributes, {:>2} containments{}",
            class.name,
            attributes,
            containments,
            if class.is_abstract { "  [abstract]" } else { "" },
        );
    }

    println!();

    // Serialize to Ecore (show first 200 chars).
    let ecore = smm_metamodel::serializer::ecore::to_ecore(smm)?;
    println!("Ecore output ({} bytes):", ecore.len());
    let preview_end = ecore.char_indices().nth(200).map_or(ecore.len(), |(i, _)| i);
    println!("{}...", &ecore[..preview_end]);
    Ok(())
}
