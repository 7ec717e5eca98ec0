//! Errors raised while populating a model.

use std::path::PathBuf;

use smm_metamodel::SchemaError;
use thiserror::Error;

/// Failure of a population run.
///
/// Shape-level anomalies (missing time, missing sensor payload, unsupported
/// value shapes, null fields) are not errors; they are resolved with defaults
/// or skipped. Everything here aborts the run.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// The metamodel does not declare an entity kind the mapper needs.
    #[error("schema lookup failed: {0}")]
    Schema(#[from] SchemaError),

    /// A frame's structure is broken beyond the documented defaults.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Wraps a frame-level failure with the frame's position in the input.
    #[error("frame {index}: {source}")]
    AtFrame {
        /// Zero-based position of the frame in the input sequence.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<PopulateError>,
    },

    /// The telemetry document has no recognizable frame sequence.
    #[error("malformed telemetry document: {0}")]
    MalformedDocument(String),

    /// The telemetry document is not valid JSON.
    #[error("invalid telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The telemetry document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
