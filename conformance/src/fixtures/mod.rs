//! Telemetry fixtures for end-to-end conformance runs.
//!
//! Each constant holds a complete telemetry document in one of the two
//! accepted layouts (a bare frame array, or frames under
//! `execution_data.simulation_data`).

mod scenario_a_flat_scalars;
mod scenario_b_nested_group;
mod scenario_c_shared_measure;
mod scenario_d_empty_run;

pub use scenario_a_flat_scalars::SCENARIO_A_FLAT_SCALARS;
pub use scenario_b_nested_group::SCENARIO_B_NESTED_GROUP;
pub use scenario_c_shared_measure::SCENARIO_C_SHARED_MEASURE;
pub use scenario_d_empty_run::SCENARIO_D_EMPTY_RUN;
