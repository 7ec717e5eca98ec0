//! Measure registry.
//!
//! The registry owns the one [`Measure`] per distinct name seen during a run
//! and hands out [`MeasureId`] handles, so every observed measure with the
//! same name points at the same definition.

use std::collections::HashMap;

use smm_metamodel::{Measure, MeasureId};

/// Deduplicating, insertion-ordered cache of measures keyed by name.
#[derive(Debug, Default)]
pub struct MeasureRegistry {
    measures: Vec<Measure>,
    by_name: HashMap<String, MeasureId>,
}

impl MeasureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of the measure called `name`, creating it with
    /// `source` on first use.
    ///
    /// The first caller's `source` wins; later calls never modify an existing
    /// measure. Any string, including the empty string, is a valid name.
    pub fn get_or_create(&mut self, name: &str, source: &str) -> MeasureId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = MeasureId::from_index(self.measures.len());
        self.measures.push(Measure::new(name, source));
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Returns the handle of an existing measure.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<MeasureId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a handle.
    #[must_use]
    pub fn get(&self, id: MeasureId) -> Option<&Measure> {
        self.measures.get(id.index())
    }

    /// Returns the number of distinct measures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// Returns `true` if no measure has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Returns all measures in creation order.
    #[must_use]
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Consumes the registry, returning all measures in creation order.
    /// Position `i` is the measure addressed by `MeasureId::from_index(i)`.
    #[must_use]
    pub fn into_measures(self) -> Vec<Measure> {
        self.measures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_returns_same_handle() {
        let mut registry = MeasureRegistry::new();
        let a = registry.get_or_create("speed", "Simulated Sensor");
        let b = registry.get_or_create("speed", "Simulated Sensor");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn first_source_wins() {
        let mut registry = MeasureRegistry::new();
        let id = registry.get_or_create("speed", "first");
        registry.get_or_create("speed", "second");
        assert_eq!(registry.get(id).map(|m| m.source.as_str()), Some("first"));
    }

    #[test]
    fn handles_follow_insertion_order() {
        let mut registry = MeasureRegistry::new();
        for name in ["rpm", "gear", "speed", "gear"] {
            registry.get_or_create(name, "s");
        }
        let names: Vec<&str> = registry.measures().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["rpm", "gear", "speed"]);
        assert_eq!(registry.lookup("speed").map(MeasureId::index), Some(2));
        assert_eq!(registry.lookup("throttle"), None);
    }

    #[test]
    fn empty_name_is_a_valid_key() {
        let mut registry = MeasureRegistry::new();
        let a = registry.get_or_create("", "s");
        let b = registry.get_or_create("", "s");
        assert_eq!(a, b);
        assert!(!registry.is_empty());
    }
}
