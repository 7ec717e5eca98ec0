//! Instance graph types.
//!
//! A [`Model`] is a forest of [`Observation`] trees
//! (`Observation → ObservedMeasure → Measurement → Attribute`) plus the
//! shared [`Measure`] set. The only edges between trees are
//! [`ObservedMeasure::measure`] handles into [`Model::measures`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a [`Measure`] in a model's measure set.
///
/// The handle is the measure's position in [`Model::measures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MeasureId(usize);

impl MeasureId {
    /// Creates a handle for the measure at `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the measure in its measure set.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named, reusable definition of what is being measured.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct Measure {
    /// Unique key within a run.
    pub name: String,
    /// Provenance label.
    pub source: String,
    /// Measurement scale; empty when unspecified.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: String,
    /// Free-form scale description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub custom_scale: Option<String>,
    /// Display format for the measure.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub measure_label_format: Option<String>,
    /// Display format for measurements of this measure.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub measurement_label_format: Option<String>,
    /// Whether viewers should show the measure.
    #[cfg_attr(feature = "serde", serde(default = "visible_default"))]
    pub visible: bool,
}

#[cfg(feature = "serde")]
fn visible_default() -> bool {
    true
}

impl Measure {
    /// Creates a visible measure with an empty scale.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            scale: String::new(),
            custom_scale: None,
            measure_label_format: None,
            measurement_label_format: None,
            visible: true,
        }
    }
}

/// Identifies the data set an observation was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct ObservationScope {
    /// URI of the scope.
    pub scope_uri: String,
}

/// The measured values of one telemetry frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct Observation {
    /// Who recorded the observation.
    pub observer: String,
    /// Tool that produced the data.
    pub tool: String,
    /// Frame time in seconds.
    pub when_observed: f64,
    /// Measures the observation was asked to cover.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub requested_measures: Vec<MeasureId>,
    /// Data sets the observation belongs to.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub scopes: Vec<ObservationScope>,
    /// Recorded values, in frame order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub observed_measures: Vec<ObservedMeasure>,
}

impl Observation {
    /// Creates an observation with no children.
    pub fn new(observer: impl Into<String>, tool: impl Into<String>, when_observed: f64) -> Self {
        Self {
            observer: observer.into(),
            tool: tool.into(),
            when_observed,
            requested_measures: Vec::new(),
            scopes: Vec::new(),
            observed_measures: Vec::new(),
        }
    }

    /// Appends an observed measure.
    pub fn push(&mut self, observed: ObservedMeasure) {
        self.observed_measures.push(observed);
    }

    /// Returns the number of measurements across all observed measures.
    #[must_use]
    pub fn measurement_count(&self) -> usize {
        self.observed_measures.iter().map(|om| om.measurements.len()).sum()
    }
}

/// Binds one measure to the measurements recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct ObservedMeasure {
    /// The shared measure definition.
    pub measure: MeasureId,
    /// Recorded values.
    #[cfg_attr(feature = "serde", serde(default))]
    pub measurements: Vec<Measurement>,
}

impl ObservedMeasure {
    /// Creates an observed measure holding a single measurement.
    #[must_use]
    pub fn single(measure: MeasureId, measurement: Measurement) -> Self {
        Self {
            measure,
            measurements: vec![measurement],
        }
    }
}

/// One recorded value instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct Measurement {
    /// Marker for degenerate or placeholder readings.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub break_value: Option<String>,
    /// Error description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    /// Context and sampled values.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<Attribute>,
}

impl Measurement {
    /// Creates a measurement with the given attributes.
    #[must_use]
    pub fn with_attributes(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }
}

/// A tagged key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Key.
    pub tag: String,
    /// Value in string form.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// A complete measurement model: every observation in input order plus the
/// deduplicated measure set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    /// One observation per input frame.
    pub observations: Vec<Observation>,
    /// Shared measure definitions, addressed by [`MeasureId`].
    pub measures: Vec<Measure>,
}

impl Model {
    /// Returns `true` if the model holds neither observations nor measures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty() && self.measures.is_empty()
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Returns the number of observed measures across all observations.
    #[must_use]
    pub fn observed_measure_count(&self) -> usize {
        self.observations.iter().map(|o| o.observed_measures.len()).sum()
    }

    /// Returns the number of measurements across all observations.
    #[must_use]
    pub fn measurement_count(&self) -> usize {
        self.observations.iter().map(Observation::measurement_count).sum()
    }

    /// Returns the number of attributes across all measurements.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.observations
            .iter()
            .flat_map(|o| o.observed_measures.iter())
            .flat_map(|om| om.measurements.iter())
            .map(|m| m.attributes.len())
            .sum()
    }

    /// Resolves a measure handle. Returns `None` for a dangling handle.
    #[must_use]
    pub fn measure(&self, id: MeasureId) -> Option<&Measure> {
        self.measures.get(id.index())
    }

    /// Looks up a measure by name.
    #[must_use]
    pub fn measure_by_name(&self, name: &str) -> Option<(MeasureId, &Measure)> {
        self.measures
            .iter()
            .enumerate()
            .find(|(_, m)| m.name == name)
            .map(|(i, m)| (MeasureId::from_index(i), m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        let mut obs = Observation::new("observer", "tool", 2.0);
        obs.push(ObservedMeasure::single(
            MeasureId::from_index(0),
            Measurement::with_attributes(vec![
                Attribute::new("wheel", "FL"),
                Attribute::new("value", "80.1"),
            ]),
        ));
        Model {
            observations: vec![obs],
            measures: vec![Measure::new("coreTemp_FL", "Simulated Sensor")],
        }
    }

    #[test]
    fn counts_walk_the_whole_forest() {
        let model = sample();
        assert_eq!(model.observation_count(), 1);
        assert_eq!(model.observed_measure_count(), 1);
        assert_eq!(model.measurement_count(), 1);
        assert_eq!(model.attribute_count(), 2);
        assert!(!model.is_empty());
    }

    #[test]
    fn measure_handles_resolve() {
        let model = sample();
        let (id, measure) = model.measure_by_name("coreTemp_FL").expect("present");
        assert_eq!(id.index(), 0);
        assert_eq!(measure.source, "Simulated Sensor");
        assert!(model.measure(MeasureId::from_index(1)).is_none());
    }

    #[test]
    fn new_measure_defaults() {
        let m = Measure::new("speed", "src");
        assert!(m.visible);
        assert!(m.scale.is_empty());
        assert!(m.custom_scale.is_none());
    }
}
