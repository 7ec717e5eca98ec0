//! Model assembler.
//!
//! Drives the mapper over a whole frame sequence with one shared
//! [`MeasureRegistry`] and collects the result into a [`Model`].

use std::borrow::Borrow;

use log::info;
use smm_metamodel::{Model, Package};

use crate::config::MapperConfig;
use crate::error::PopulateError;
use crate::frame::Frame;
use crate::mapper::Populator;
use crate::registry::MeasureRegistry;

impl Populator {
    /// Maps every frame in input order and returns the observations together
    /// with the registry's measures.
    ///
    /// An empty sequence yields an empty model. The first malformed frame
    /// aborts the run; no partial model is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PopulateError::AtFrame`] wrapping the failure of the first
    /// frame that could not be mapped.
    pub fn build_model<I>(&self, frames: I) -> Result<Model, PopulateError>
    where
        I: IntoIterator,
        I::Item: Borrow<Frame>,
    {
        let mut registry = MeasureRegistry::new();
        let mut observations = Vec::new();

        for (index, frame) in frames.into_iter().enumerate() {
            let observation = self
                .map_frame(frame.borrow(), &mut registry)
                .map_err(|source| PopulateError::AtFrame {
                    index,
                    source: Box::new(source),
                })?;
            observations.push(observation);
        }

        let model = Model {
            observations,
            measures: registry.into_measures(),
        };
        info!(
            "populated {} observations, {} measures, {} measurements",
            model.observation_count(),
            model.measures.len(),
            model.measurement_count()
        );
        Ok(model)
    }
}

/// Builds a model against the SMM package with the default configuration.
///
/// # Errors
///
/// See [`Populator::build_model`].
pub fn build_model<I>(frames: I) -> Result<Model, PopulateError>
where
    I: IntoIterator,
    I::Item: Borrow<Frame>,
{
    Populator::new(Package::smm(), MapperConfig::default())?.build_model(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sequence_gives_empty_model() {
        let model = build_model(Vec::<Frame>::new()).expect("empty is valid");
        assert!(model.is_empty());
    }

    #[test]
    fn borrowed_frames_are_accepted() {
        let frames = vec![Frame::new(json!({ "time": 1 })), Frame::new(json!({ "time": 2 }))];
        let model = build_model(&frames).expect("mapped");
        assert_eq!(model.observation_count(), 2);
        assert_eq!(model.observations[1].when_observed, 2.0);
    }

    #[test]
    fn failure_reports_the_frame_index() {
        let frames = vec![
            Frame::new(json!({ "time": 0.0 })),
            Frame::new(json!({ "sensors": { "_data": [] } })),
        ];
        let err = build_model(frames).expect_err("second frame is malformed");
        match err {
            PopulateError::AtFrame { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, PopulateError::MalformedFrame(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
