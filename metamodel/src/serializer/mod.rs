//! Serializers for SMM models and the SMM metamodel.
//!
//! Three serialization formats are supported:
//! - **XMI** ([`xmi`]): the interchange format, output to `smm.xmi`
//! - **JSON** ([`json`]): lossless serde encoding of the instance graph, output to `smm.json`
//! - **Ecore** ([`ecore`]): the metamodel itself as an `EPackage`, output to `smm.ecore`

pub mod ecore;
#[cfg(feature = "serializers")]
pub mod json;
pub mod xmi;

mod xml;
