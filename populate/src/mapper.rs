//! Frame mapper.
//!
//! Turns one telemetry [`Frame`] into one [`Observation`]:
//!
//! ```text
//! Observation (whenObserved = frame time)
//!   ├── ObservedMeasure → Measure "speed"
//!   │     └── Measurement
//!   │           └── Attribute speed = 42.0
//!   └── ObservedMeasure → Measure "coreTemp_FL"
//!         └── Measurement
//!               ├── Attribute wheel = FL
//!               ├── Attribute type  = coreTemp
//!               └── Attribute value = 80.1
//! ```

use log::{debug, trace};
use smm_metamodel::smm::REQUIRED_CLASSES;
use smm_metamodel::{
    Attribute, Measurement, Observation, ObservationScope, ObservedMeasure, Package,
};

use crate::config::MapperConfig;
use crate::error::PopulateError;
use crate::frame::Frame;
use crate::registry::MeasureRegistry;
use crate::shape::{classify, Group, Scalar, SensorValue};

/// Maps frames onto a metamodel that has been checked to declare every
/// required entity kind.
#[derive(Debug, Clone)]
pub struct Populator {
    config: MapperConfig,
}

impl Populator {
    /// Creates a populator after checking that `package` declares the five
    /// entity kinds the mapping produces.
    ///
    /// # Errors
    ///
    /// Returns [`PopulateError::Schema`] naming the first missing class.
    pub fn new(package: &Package, config: MapperConfig) -> Result<Self, PopulateError> {
        for name in REQUIRED_CLASSES {
            package.require_class(name)?;
        }
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Maps one frame, creating measures in `registry` as new names appear.
    ///
    /// Sensors are visited in document order. Unsupported shapes and null
    /// fields are skipped without error.
    ///
    /// # Errors
    ///
    /// Returns [`PopulateError::MalformedFrame`] if the frame's sensor path is
    /// present but not made of objects.
    pub fn map_frame(
        &self,
        frame: &Frame,
        registry: &mut MeasureRegistry,
    ) -> Result<Observation, PopulateError> {
        let time_value = frame.time_value();
        let sensors = frame.sensors()?;

        let mut observation = Observation::new(&self.config.observer, &self.config.tool, time_value);
        if let Some(uri) = &self.config.scope_uri {
            observation.scopes.push(ObservationScope {
                scope_uri: uri.clone(),
            });
        }

        let Some(sensors) = sensors else {
            debug!("frame at t={time_value}: no sensor payload");
            return Ok(observation);
        };

        let mut skipped = 0usize;
        for (sensor_name, sensor_value) in sensors {
            match classify(sensor_value) {
                SensorValue::Scalar(scalar) => {
                    observation.push(self.map_scalar(sensor_name, scalar, registry));
                }
                SensorValue::NestedGroup(groups) => {
                    for group in &groups {
                        self.map_group(group, registry, &mut observation);
                    }
                }
                SensorValue::Unsupported => {
                    trace!("frame at t={time_value}: skipping sensor '{sensor_name}' (unsupported shape)");
                    skipped += 1;
                }
            }
        }

        debug!(
            "frame at t={time_value}: {} observed measures, {skipped} sensors skipped",
            observation.observed_measures.len()
        );
        Ok(observation)
    }

    /// A flat reading becomes one measurement with one attribute tagged by the
    /// sensor name.
    fn map_scalar(
        &self,
        sensor_name: &str,
        scalar: Scalar<'_>,
        registry: &mut MeasureRegistry,
    ) -> ObservedMeasure {
        let measure = registry.get_or_create(sensor_name, &self.config.measure_source);
        let measurement = Measurement {
            break_value: Some(String::new()),
            error: None,
            attributes: vec![Attribute::new(sensor_name, scalar.render())],
        };
        ObservedMeasure::single(measure, measurement)
    }

    /// Each non-null field of a group becomes its own observed measure on the
    /// measure `<field>_<group>`.
    fn map_group(
        &self,
        group: &Group<'_>,
        registry: &mut MeasureRegistry,
        observation: &mut Observation,
    ) {
        for (field, reading) in &group.fields {
            let Some(reading) = reading else {
                continue;
            };
            let measure = registry.get_or_create(
                &format!("{field}_{}", group.key),
                &self.config.measure_source,
            );
            let measurement = Measurement::with_attributes(vec![
                Attribute::new(&self.config.group_tag, group.key),
                Attribute::new(&self.config.field_tag, *field),
                Attribute::new(&self.config.value_tag, reading.render()),
            ]);
            observation.push(ObservedMeasure::single(measure, measurement));
        }
    }
}
