//! Conformance validators.

pub mod metamodel;
pub mod model;
pub mod scenarios;
pub mod xmi;
