use serde_json::Value as JsonValue;

use crate::error::PollError;

/// One decoded status document: instantaneous power draw and the cumulative
/// energy counter. Derived fresh each cycle, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Instantaneous power in watts, may be negative when exporting.
    pub power: i64,
    /// Cumulative energy counter, integer part of the device's `cnt` field.
    pub energy: i64,
}

/// Decodes the single-line JSON status payload of a YouLess device.
///
/// The device reports power under `pwr` (number) and the energy counter
/// under `cnt` (string with an optional comma-separated fraction, e.g.
/// `"8821,3"`). Neither field is guaranteed to sit at the top level, so both
/// are located by a deep search over the document.
pub fn parse_reading(payload: &str) -> Result<Reading, PollError> {
    let document: JsonValue = serde_json::from_str(payload)
        .map_err(|e| PollError::parse(format!("invalid status payload: {e}")))?;

    Ok(Reading {
        power: parse_power(&document)?,
        energy: parse_energy(&document)?,
    })
}

fn parse_power(document: &JsonValue) -> Result<i64, PollError> {
    let field =
        find_field(document, "pwr").ok_or_else(|| PollError::parse("field 'pwr' is missing"))?;

    field
        .as_i64()
        .or_else(|| field.as_f64().map(|v| v as i64))
        .ok_or_else(|| PollError::parse(format!("field 'pwr' is not numeric: {field}")))
}

fn parse_energy(document: &JsonValue) -> Result<i64, PollError> {
    let field =
        find_field(document, "cnt").ok_or_else(|| PollError::parse("field 'cnt' is missing"))?;
    let text = field
        .as_str()
        .ok_or_else(|| PollError::parse(format!("field 'cnt' is not a string: {field}")))?;

    // Only the integer prefix before the comma is meaningful
    let prefix = text.split(',').next().unwrap_or_default();
    prefix
        .parse::<i64>()
        .map_err(|e| PollError::parse(format!("field 'cnt' value {text:?}: {e}")))
}

/// Depth-first search for a field anywhere in the document, objects before
/// their children, document order otherwise.
fn find_field<'a>(node: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    match node {
        JsonValue::Object(map) => {
            if let Some(value) = map.get(name) {
                return Some(value);
            }
            map.values().find_map(|child| find_field(child, name))
        }
        JsonValue::Array(items) => items.iter().find_map(|child| find_field(child, name)),
        _ => None,
    }
}
