//! Scenario C: the same sensor across frames.

/// Two frames both reporting `speed`; expects a single shared measure.
pub const SCENARIO_C_SHARED_MEASURE: &str = r#"
[
  { "time": 0.0, "sensors": { "_data": { "speed": 1.0 } } },
  { "time": 0.1, "sensors": { "_data": { "speed": 2.0 } } }
]
"#;
