//! Scenario B: a per-wheel sensor group with a null reading.
//!
//! Expects one measure `coreTemp_FL` whose measurement carries the
//! `wheel`, `type` and `value` attributes; the null `surfaceTemp` produces
//! nothing.

/// Telemetry document wrapped in `execution_data.simulation_data`.
pub const SCENARIO_B_NESTED_GROUP: &str = r#"
{
  "execution_data": {
    "simulation_data": [
      {
        "time": 2.0,
        "sensors": {
          "_data": {
            "wheelThermals": {
              "FL": { "coreTemp": 80.1, "surfaceTemp": null }
            }
          }
        }
      }
    ]
  }
}
"#;
