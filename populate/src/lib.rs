//! SMM population engine.
//!
//! Converts schemaless simulation telemetry into an SMM [`Model`]: one
//! `Observation` per frame, one shared `Measure` per distinct measure name,
//! and `Measurement`s whose `Attribute`s hold the readings as strings.
//!
//! # Entry Point
//!
//! ```
//! use serde_json::json;
//! use smm_populate::{build_model, Frame};
//!
//! let frames = vec![
//!     Frame::new(json!({ "time": 0.5, "sensors": { "_data": { "speed": 12.0 } } })),
//!     Frame::new(json!({ "time": 1.0, "sensors": { "_data": { "speed": 13.5 } } })),
//! ];
//! let model = build_model(&frames).expect("well-formed frames");
//! assert_eq!(model.observations.len(), 2);
//! assert_eq!(model.measures.len(), 1);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! telemetry document ─ source::load_frames ─▶ [Frame]
//!   [Frame] ─ Populator::build_model ─▶ Model
//!     per frame: Populator::map_frame ─ shape::classify ─▶ MeasureRegistry
//! ```
//!
//! Measure names are the sensor name for flat readings and `<field>_<group>`
//! for per-component readings, e.g. `coreTemp_FL`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod registry;
pub mod shape;
pub mod source;

pub use assembler::build_model;
pub use config::MapperConfig;
pub use error::PopulateError;
pub use frame::Frame;
pub use mapper::Populator;
pub use registry::MeasureRegistry;
pub use shape::{classify, Scalar, SensorValue};
pub use smm_metamodel::Model;
