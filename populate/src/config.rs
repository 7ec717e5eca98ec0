//! Mapper configuration.

/// Provenance labels and attribute tags written by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// `Observation.observer` of every observation.
    pub observer: String,
    /// `Observation.tool` of every observation.
    pub tool: String,
    /// `Measure.source` of every measure the registry creates.
    pub measure_source: String,
    /// When set, every observation carries one scope with this URI.
    pub scope_uri: Option<String>,
    /// Tag of the attribute holding a nested sensor's group key.
    pub group_tag: String,
    /// Tag of the attribute holding a nested sensor's field name.
    pub field_tag: String,
    /// Tag of the attribute holding a nested sensor's reading.
    pub value_tag: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            observer: "SDC-Simulator".to_owned(),
            tool: "sdc_sim".to_owned(),
            measure_source: "Simulated Sensor".to_owned(),
            scope_uri: None,
            group_tag: "wheel".to_owned(),
            field_tag: "type".to_owned(),
            value_tag: "value".to_owned(),
        }
    }
}
