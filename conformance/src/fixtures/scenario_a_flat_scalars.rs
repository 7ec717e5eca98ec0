//! Scenario A: one frame of flat scalar readings.
//!
//! Expects one observation with two observed measures (`speed`,
//! `brakePressure`), each holding a single attribute tagged with the sensor
//! name.

/// Bare frame array with one frame.
pub const SCENARIO_A_FLAT_SCALARS: &str = r#"
[
  {
    "time": 1.5,
    "sensors": {
      "_data": {
        "speed": 42.0,
        "brakePressure": true
      }
    }
  }
]
"#;
