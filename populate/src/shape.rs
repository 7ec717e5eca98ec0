//! Sensor value shape classification.
//!
//! Telemetry values arrive schemaless. [`classify`] sorts each one into a
//! closed set of shapes once, at the boundary, so the mapper dispatches on a
//! variant instead of probing JSON types:
//!
//! - [`SensorValue::Scalar`]: number, boolean, or string
//! - [`SensorValue::NestedGroup`]: `{ group: { field: scalar | null } }`
//! - [`SensorValue::Unsupported`]: null, arrays, and any other nesting

use serde_json::{Number, Value};

/// A single scalar reading, borrowed from the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Boolean reading.
    Bool(bool),
    /// Integer or floating-point reading.
    Number(&'a Number),
    /// Text reading.
    Text(&'a str),
}

impl<'a> Scalar<'a> {
    /// Returns the scalar held by `value`, or `None` for null and containers.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::String(s) => Some(Scalar::Text(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Renders the reading as the string stored in an SMM attribute value.
    ///
    /// Integers print in decimal, booleans as `True` / `False`, text
    /// verbatim. Floats print their shortest round-trip digits: positional
    /// with a fractional part for decimal exponents -4 to 15 (`42.0`,
    /// `0.0001`), scientific with a signed two-digit exponent otherwise
    /// (`1e-05`, `1e+16`).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Scalar::Bool(true) => "True".to_owned(),
            Scalar::Bool(false) => "False".to_owned(),
            Scalar::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => render_float(f),
                _ => n.to_string(),
            },
            Scalar::Text(s) => (*s).to_owned(),
        }
    }
}

fn render_float(value: f64) -> String {
    // `{:e}` gives the shortest round-trip digits, e.g. `4.2e1`, `-1e-5`.
    let scientific = format!("{value:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return scientific;
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{exp_sign}{:02}", exp.unsigned_abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    // Digits left of the decimal point; at most 16 here.
    let point = exp + 1;
    let body = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point.unsigned_abs() as usize;
        if point >= digits.len() {
            format!("{digits}{}.0", "0".repeat(point - digits.len()))
        } else {
            let (int, frac) = digits.split_at(point);
            format!("{int}.{frac}")
        }
    };
    format!("{sign}{body}")
}

/// One group of a nested sensor, e.g. the `FL` wheel of `wheelThermals`.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    /// Group key (component identifier).
    pub key: &'a str,
    /// Field readings in document order; `None` marks a null reading.
    pub fields: Vec<(&'a str, Option<Scalar<'a>>)>,
}

/// Shape of one sensor value.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue<'a> {
    /// A flat reading.
    Scalar(Scalar<'a>),
    /// Per-component readings, two levels deep.
    NestedGroup(Vec<Group<'a>>),
    /// Anything else; skipped by the mapper.
    Unsupported,
}

/// Classifies a sensor value by shape.
///
/// A value is a nested group only if every entry is an object and every
/// entry of those objects is a scalar or null. A single entry of any other
/// shape makes the whole value unsupported.
#[must_use]
pub fn classify(value: &Value) -> SensorValue<'_> {
    if let Some(scalar) = Scalar::from_value(value) {
        return SensorValue::Scalar(scalar);
    }
    let Value::Object(groups) = value else {
        return SensorValue::Unsupported;
    };

    let mut out = Vec::with_capacity(groups.len());
    for (key, group) in groups {
        let Value::Object(fields) = group else {
            return SensorValue::Unsupported;
        };
        let mut readings = Vec::with_capacity(fields.len());
        for (field, reading) in fields {
            match reading {
                Value::Null => readings.push((field.as_str(), None)),
                other => match Scalar::from_value(other) {
                    Some(scalar) => readings.push((field.as_str(), Some(scalar))),
                    None => return SensorValue::Unsupported,
                },
            }
        }
        out.push(Group {
            key: key.as_str(),
            fields: readings,
        });
    }
    SensorValue::NestedGroup(out)
}
