//! End-to-end population scenarios: frames in, model and XMI out.

use std::collections::HashSet;

use serde_json::{json, Value};
use smm_metamodel::serializer::json::{from_json, to_json};
use smm_metamodel::serializer::xmi::to_xmi;
use smm_metamodel::{Model, SerializeError};
use smm_populate::{build_model, Frame, MeasureRegistry};

fn frames(values: Vec<Value>) -> Vec<Frame> {
    values.into_iter().map(Frame::new).collect()
}

fn measure_name(model: &Model, observation: usize, observed: usize) -> &str {
    let id = model.observations[observation].observed_measures[observed].measure;
    model.measure(id).map(|m| m.name.as_str()).unwrap_or("<dangling>")
}

/// Tag/value pairs per observation, in order, with measure names resolved.
fn shape_of(model: &Model) -> Vec<Vec<(String, Vec<(String, String)>)>> {
    model
        .observations
        .iter()
        .map(|obs| {
            obs.observed_measures
                .iter()
                .map(|om| {
                    let name = model.measure(om.measure).map(|m| m.name.clone()).unwrap_or_default();
                    let pairs = om
                        .measurements
                        .iter()
                        .flat_map(|m| m.attributes.iter())
                        .map(|a| (a.tag.clone(), a.value.clone()))
                        .collect();
                    (name, pairs)
                })
                .collect()
        })
        .collect()
}

/// Measure names read straight off the raw records: the sensor name for
/// scalar readings, `<field>_<group>` for non-null grouped readings.
fn names_in_input(frames: &[Frame]) -> HashSet<String> {
    let mut names = HashSet::new();
    for frame in frames {
        let Some(sensors) = frame
            .as_value()
            .pointer("/sensors/_data")
            .and_then(Value::as_object)
        else {
            continue;
        };
        for (sensor, value) in sensors {
            match value {
                Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    names.insert(sensor.clone());
                }
                Value::Object(groups) => {
                    for (group, fields) in groups {
                        let Some(fields) = fields.as_object() else {
                            continue;
                        };
                        for (field, reading) in fields {
                            if !reading.is_null() {
                                names.insert(format!("{field}_{group}"));
                            }
                        }
                    }
                }
                Value::Null | Value::Array(_) => {}
            }
        }
    }
    names
}

fn mixed_run() -> Vec<Frame> {
    frames(vec![
        json!({ "time": 0.0, "sensors": { "_data": {
            "speed": 0.0,
            "gear": 1,
            "wheelThermals": {
                "FL": { "brakeCoreTemperature": 20.5, "brakeSurfaceTemperature": 20.1 },
                "FR": { "brakeCoreTemperature": 20.4, "brakeSurfaceTemperature": null }
            }
        } } }),
        json!({ "time": "0.05", "sensors": { "_data": {
            "speed": 1.25,
            "electrics": [1, 0, 1],
            "wheelThermals": {
                "FL": { "brakeCoreTemperature": 20.9, "brakeSurfaceTemperature": 20.3 },
                "FR": { "brakeCoreTemperature": 20.8, "brakeSurfaceTemperature": 20.2 }
            }
        } } }),
        json!({ "time": 0.1, "sensors": {} }),
    ])
}

#[test]
fn scenario_a_flat_scalars() {
    let model = build_model(frames(vec![json!({
        "time": 1.5,
        "sensors": { "_data": { "speed": 42.0, "brakePressure": true } }
    })]))
    .expect("mapped");

    assert_eq!(model.observations.len(), 1);
    let obs = &model.observations[0];
    assert_eq!(obs.when_observed, 1.5);
    assert_eq!(obs.observed_measures.len(), 2);
    assert_eq!(measure_name(&model, 0, 0), "speed");
    assert_eq!(measure_name(&model, 0, 1), "brakePressure");

    let speed = &obs.observed_measures[0].measurements;
    assert_eq!(speed.len(), 1);
    assert_eq!(speed[0].attributes.len(), 1);
    assert_eq!(speed[0].attributes[0].tag, "speed");
    assert_eq!(speed[0].attributes[0].value, "42.0");

    let brake = &obs.observed_measures[1].measurements[0].attributes;
    assert_eq!(brake.len(), 1);
    assert_eq!(brake[0].tag, "brakePressure");
    assert_eq!(brake[0].value, "True");
}

#[test]
fn scenario_b_nested_group_with_null_field() {
    let model = build_model(frames(vec![json!({
        "time": 2.0,
        "sensors": { "_data": { "wheelThermals": {
            "FL": { "coreTemp": 80.1, "surfaceTemp": null }
        } } }
    })]))
    .expect("mapped");

    let obs = &model.observations[0];
    assert_eq!(obs.observed_measures.len(), 1);
    assert_eq!(measure_name(&model, 0, 0), "coreTemp_FL");
    assert!(model.measure_by_name("surfaceTemp_FL").is_none());

    let measurements = &obs.observed_measures[0].measurements;
    assert_eq!(measurements.len(), 1);
    let pairs: Vec<(&str, &str)> = measurements[0]
        .attributes
        .iter()
        .map(|a| (a.tag.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(pairs, [("wheel", "FL"), ("type", "coreTemp"), ("value", "80.1")]);
}

#[test]
fn scenario_c_repeated_sensor_shares_one_measure() {
    let model = build_model(frames(vec![
        json!({ "time": 0.0, "sensors": { "_data": { "speed": 1.0 } } }),
        json!({ "time": 0.1, "sensors": { "_data": { "speed": 2.0 } } }),
    ]))
    .expect("mapped");

    assert_eq!(model.measures.len(), 1);
    assert_eq!(model.measures[0].name, "speed");
    let first = model.observations[0].observed_measures[0].measure;
    let second = model.observations[1].observed_measures[0].measure;
    assert_eq!(first, second);
    assert_eq!(model.observed_measure_count(), 2);
}

#[test]
fn scenario_d_empty_run() {
    let model = build_model(Vec::<Frame>::new()).expect("empty is valid");
    assert!(model.observations.is_empty());
    assert!(model.measures.is_empty());

    let xmi = to_xmi(&model).expect("serializable");
    assert!(xmi.starts_with("<?xml"));
    assert!(xmi.contains("<xmi:XMI"));
    assert!(!xmi.contains("<smm:Observation"));
}

#[test]
fn one_observation_per_frame_even_without_sensors() {
    let run = mixed_run();
    let model = build_model(&run).expect("mapped");
    assert_eq!(model.observations.len(), run.len());
    assert!(model.observations[2].observed_measures.is_empty());
    assert_eq!(model.observations[1].when_observed, 0.05);
}

#[test]
fn measure_count_equals_distinct_computed_names() {
    let run = mixed_run();
    let model = build_model(&run).expect("mapped");

    let expected = names_in_input(&run);
    let produced: HashSet<String> = model.measures.iter().map(|m| m.name.clone()).collect();
    assert_eq!(produced, expected);
    assert_eq!(model.measures.len(), expected.len());

    // speed, gear, 2 fields x 2 wheels; `electrics` is a list and skipped.
    assert_eq!(model.measures.len(), 6);
    let names: HashSet<&str> = model.measures.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names.len(), model.measures.len(), "measure names must be unique");
    assert!(names.contains("brakeSurfaceTemperature_FR"));
    assert!(!names.contains("electrics"));
}

#[test]
fn null_field_does_not_block_siblings_or_other_sensors() {
    let model = build_model(mixed_run()).expect("mapped");
    let first = &model.observations[0];
    // speed, gear, FL core + surface, FR core (FR surface is null).
    assert_eq!(first.observed_measures.len(), 5);
    assert_eq!(model.measurement_count(), 5 + 5);
}

#[test]
fn mapping_is_a_pure_function_of_its_input() {
    let a = build_model(mixed_run()).expect("mapped");
    let b = build_model(mixed_run()).expect("mapped");
    assert_eq!(shape_of(&a), shape_of(&b));
    assert_eq!(a, b);
    assert_eq!(
        to_xmi(&a).expect("serializable"),
        to_xmi(&b).expect("serializable")
    );
}

#[test]
fn every_reference_resolves_in_the_serialized_document() {
    let model = build_model(mixed_run()).expect("mapped");
    let xmi = to_xmi(&model).expect("serializable");
    let roots = model.observations.len() + model.measures.len();
    for obs in &model.observations {
        for om in &obs.observed_measures {
            let root = model.observations.len() + om.measure.index();
            assert!(root < roots);
            assert!(xmi.contains(&format!("measure=\"/{root}\"")));
        }
    }
    assert_eq!(xmi.matches("<smm:Measure ").count(), model.measures.len());
}

#[test]
fn registry_can_be_shared_across_manual_calls() {
    let populator =
        smm_populate::Populator::new(smm_metamodel::Package::smm(), Default::default())
            .expect("smm is complete");
    let mut registry = MeasureRegistry::new();
    let run = mixed_run();
    for frame in &run {
        populator.map_frame(frame, &mut registry).expect("mapped");
    }
    assert_eq!(registry.len(), 6);
    assert_eq!(registry.measures()[0].name, "speed");
}

#[test]
fn control_characters_in_sensor_names_are_refused_by_xmi() {
    let model = build_model(frames(vec![json!({
        "time": 0.0,
        "sensors": { "_data": { "bad\u{0001}name": 1.0, "speed": 2.0 } }
    })]))
    .expect("mapping accepts any sensor name");
    assert!(model.measure_by_name("bad\u{1}name").is_some());

    let err = to_xmi(&model).expect_err("U+0001 cannot appear in XML 1.0");
    assert_eq!(
        err,
        SerializeError::UnrepresentableChar {
            element: "attributes".to_owned(),
            attribute: "tag".to_owned(),
            code: 1,
        }
    );

    // The JSON document still carries the name unchanged.
    let encoded = to_json(&model).expect("encodable");
    assert_eq!(from_json(&encoded).expect("decodable"), model);
}
