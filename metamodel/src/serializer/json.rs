//! JSON serializer for SMM models.
//!
//! The document carries the package identity next to the instance graph:
//!
//! ```json
//! { "package": "smm", "nsUri": "http://example.org/smm",
//!   "observations": [ ... ], "measures": [ ... ] }
//! ```
//!
//! Measure references are encoded as indices into `measures`, so decoding an
//! encoded model yields an identical [`Model`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::Model;
use crate::model::Package;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    package: &'a str,
    ns_uri: &'a str,
    #[serde(flatten)]
    model: &'a Model,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[allow(dead_code)]
    package: String,
    #[allow(dead_code)]
    ns_uri: String,
    #[serde(flatten)]
    model: Model,
}

/// Serializes a model to a JSON `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
///
/// # Errors
///
/// Returns an error if a value cannot be represented in JSON.
pub fn to_json(model: &Model) -> serde_json::Result<Value> {
    let smm = Package::smm();
    serde_json::to_value(DocumentRef {
        package: smm.name,
        ns_uri: smm.ns_uri,
        model,
    })
}

/// Decodes a model from a document produced by [`to_json`].
///
/// # Errors
///
/// Returns an error if the document does not have the expected shape.
pub fn from_json(value: &Value) -> serde_json::Result<Model> {
    Document::deserialize(value).map(|doc| doc.model)
}
