//! Scenario D: a run that recorded no frames.

/// Wrapped document with an empty frame list.
pub const SCENARIO_D_EMPTY_RUN: &str = r#"
{ "execution_data": { "simulation_data": [] } }
"#;
