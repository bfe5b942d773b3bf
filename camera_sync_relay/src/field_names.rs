/// Field-name normalization for relayed camera states.
///
/// Producers spell keys in their own convention (`Aspect`, `FOV`,
/// `IsPerspective`...). Every known spelling maps to the lower camel case
/// wire name through a fixed table, whatever its casing. Values, and keys outside the table,
/// pass through untouched.

use serde_json::{Map, Value};
use crate::error::{RelayError, RelayResult};

/// Known key spellings and their wire name.
///
/// Spellings match case-insensitively with underscores ignored, so one row
/// covers `Aspect`, `ASPECT` and `aspect`, and `ORTHO_SCALE` maps like
/// `orthoScale`.
pub const FIELD_NAMES: &[(&str, &str)] = &[
    ("aspect", "aspect"),
    ("isPerspective", "isPerspective"),
    ("fov", "fov"),
    ("fieldOfView", "fov"),
    ("position", "position"),
    ("target", "target"),
    ("up", "up"),
    ("orthoScale", "orthoScale"),
];

/// Wire name for `key`, if it is a known spelling.
pub fn canonical_name(key: &str) -> Option<&'static str> {
    let folded = key.replace('_', "");
    FIELD_NAMES
        .iter()
        .find(|(spelling, _)| spelling.eq_ignore_ascii_case(&folded))
        .map(|(_, canonical)| *canonical)
}

/// Rename the top-level keys of a payload object to their wire names.
///
/// When a payload carries both an alias and the wire name itself, the value
/// under the wire name wins.
///
/// # Errors
///
/// `RelayError::MalformedPayload` if `value` is not a JSON object.
pub fn normalize_payload(value: Value) -> RelayResult<Value> {
    let Value::Object(fields) = value else {
        return Err(RelayError::MalformedPayload("expected a JSON object".to_string()));
    };

    let mut normalized = Map::with_capacity(fields.len());
    for (key, field) in fields {
        match canonical_name(&key) {
            Some(canonical) if canonical == key => {
                normalized.insert(key, field);
            }
            Some(canonical) => {
                normalized.entry(canonical).or_insert(field);
            }
            None => {
                normalized.entry(key).or_insert(field);
            }
        }
    }

    Ok(Value::Object(normalized))
}

/// Parse a request body and serialize its normalized form.
///
/// # Errors
///
/// `RelayError::MalformedPayload` if the body is not a JSON object.
pub fn normalize_json(body: &[u8]) -> RelayResult<String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| RelayError::MalformedPayload(err.to_string()))?;
    let normalized = normalize_payload(value)?;
    serde_json::to_string(&normalized).map_err(|err| RelayError::MalformedPayload(err.to_string()))
}

#[cfg(test)]
#[path = "field_names_tests.rs"]
mod tests;
