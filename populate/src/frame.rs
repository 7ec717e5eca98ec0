//! Telemetry frames.
//!
//! A frame is one record of the simulation's time series:
//!
//! ```json
//! { "time": 1.5, "sensors": { "_data": { "speed": 42.0, "wheelThermals": { ... } } } }
//! ```

use serde_json::{Map, Value};

use crate::error::PopulateError;

/// Field holding the frame time in seconds.
pub const TIME_FIELD: &str = "time";
/// Field holding the sensor envelope.
pub const SENSORS_FIELD: &str = "sensors";
/// Field inside the sensor envelope holding the sensor-name → value mapping.
pub const PAYLOAD_FIELD: &str = "_data";

/// One telemetry record.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame(Value);

impl Frame {
    /// Wraps a raw telemetry record.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw record.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the frame time in seconds.
    ///
    /// Accepts a JSON number or a string holding a number. Absent, null,
    /// non-numeric, and non-finite times all yield `0.0`.
    #[must_use]
    pub fn time_value(&self) -> f64 {
        let parsed = match self.0.get(TIME_FIELD) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|t| t.is_finite()).unwrap_or(0.0)
    }

    /// Returns the sensor mapping at `sensors._data`.
    ///
    /// A missing or null level yields `Ok(None)`, which callers treat as an
    /// empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`PopulateError::MalformedFrame`] if the frame itself, or either
    /// level of the sensor path, is present but not an object.
    pub fn sensors(&self) -> Result<Option<&Map<String, Value>>, PopulateError> {
        let Value::Object(record) = &self.0 else {
            return Err(PopulateError::MalformedFrame(format!(
                "frame is {}, expected an object",
                kind(&self.0)
            )));
        };
        let Some(envelope) = object_field(record, SENSORS_FIELD)? else {
            return Ok(None);
        };
        object_field(envelope, PAYLOAD_FIELD)
    }
}

impl From<Value> for Frame {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

fn object_field<'a>(
    map: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a Map<String, Value>>, PopulateError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(PopulateError::MalformedFrame(format!(
            "'{field}' is {}, expected an object",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_accepts_numbers_and_numeric_strings() {
        assert_eq!(Frame::new(json!({ "time": 1.5 })).time_value(), 1.5);
        assert_eq!(Frame::new(json!({ "time": 3 })).time_value(), 3.0);
        assert_eq!(Frame::new(json!({ "time": " 2.25 " })).time_value(), 2.25);
    }

    #[test]
    fn time_defaults_to_zero() {
        assert_eq!(Frame::new(json!({})).time_value(), 0.0);
        assert_eq!(Frame::new(json!({ "time": null })).time_value(), 0.0);
        assert_eq!(Frame::new(json!({ "time": "soon" })).time_value(), 0.0);
        assert_eq!(Frame::new(json!({ "time": true })).time_value(), 0.0);
        assert_eq!(Frame::new(json!({ "time": "NaN" })).time_value(), 0.0);
        assert_eq!(Frame::new(json!([1, 2])).time_value(), 0.0);
    }

    #[test]
    fn raw_record_is_kept_unchanged() {
        let record = json!({ "time": "0.5", "extra": [1, 2] });
        let frame = Frame::from(record.clone());
        assert_eq!(frame.as_value(), &record);
    }

    #[test]
    fn sensors_are_read_from_the_payload() {
        let frame = Frame::new(json!({ "sensors": { "_data": { "speed": 1 } } }));
        let sensors = frame.sensors().expect("well formed").expect("present");
        assert_eq!(sensors.len(), 1);
    }

    #[test]
    fn missing_levels_mean_no_sensors() {
        for value in [
            json!({}),
            json!({ "sensors": null }),
            json!({ "sensors": {} }),
            json!({ "sensors": { "_data": null } }),
        ] {
            assert!(Frame::new(value).sensors().expect("well formed").is_none());
        }
    }

    #[test]
    fn non_object_levels_are_malformed() {
        for value in [
            json!("frame"),
            json!({ "sensors": [1] }),
            json!({ "sensors": { "_data": 5 } }),
        ] {
            let err = Frame::new(value).sensors().expect_err("malformed");
            assert!(matches!(err, PopulateError::MalformedFrame(_)), "{err}");
        }
    }
}
