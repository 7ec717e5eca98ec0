//! Telemetry document loading.
//!
//! Two layouts are accepted:
//! - a bare JSON array of frames
//! - a campaign document, with frames at `execution_data.simulation_data`

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::error::PopulateError;
use crate::frame::Frame;

/// Field of a campaign document holding the run's execution record.
pub const EXECUTION_FIELD: &str = "execution_data";
/// Field of the execution record holding the frame sequence.
pub const FRAMES_FIELD: &str = "simulation_data";

/// Reads frames from a JSON telemetry document.
///
/// # Errors
///
/// Returns [`PopulateError::Json`] for invalid JSON and
/// [`PopulateError::MalformedDocument`] for an unrecognized layout.
pub fn load_frames<R: Read>(reader: R) -> Result<Vec<Frame>, PopulateError> {
    let document: Value = serde_json::from_reader(reader)?;
    frames_from_document(document)
}

/// Reads frames from a JSON telemetry document on disk.
///
/// # Errors
///
/// Returns [`PopulateError::Io`] if the file cannot be opened, otherwise as
/// [`load_frames`].
pub fn load_frames_from_path(path: &Path) -> Result<Vec<Frame>, PopulateError> {
    let file = File::open(path).map_err(|source| PopulateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let frames = load_frames(BufReader::new(file))?;
    debug!("loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Extracts the frame sequence from an already parsed document.
///
/// Missing `execution_data` or `simulation_data` levels yield no frames.
///
/// # Errors
///
/// Returns [`PopulateError::MalformedDocument`] if the document is neither an
/// array nor an object, or a level of the frame path has the wrong type.
pub fn frames_from_document(document: Value) -> Result<Vec<Frame>, PopulateError> {
    let frames = match document {
        Value::Array(items) => items,
        Value::Object(mut campaign) => match campaign.remove(EXECUTION_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(mut execution)) => match execution.remove(FRAMES_FIELD) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(PopulateError::MalformedDocument(format!(
                        "'{EXECUTION_FIELD}.{FRAMES_FIELD}' is not an array"
                    )))
                }
            },
            Some(_) => {
                return Err(PopulateError::MalformedDocument(format!(
                    "'{EXECUTION_FIELD}' is not an object"
                )))
            }
        },
        _ => {
            return Err(PopulateError::MalformedDocument(
                "expected a frame array or a campaign object".to_owned(),
            ))
        }
    };

    if frames.is_empty() {
        warn!("telemetry document contains no frames");
    }
    Ok(frames.into_iter().map(Frame::new).collect())
}
