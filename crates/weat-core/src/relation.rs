//! Join-shape normalization for embedded to-one relations.
//!
//! Depending on how a to-one relation is selected (a `json_agg` over a
//! LEFT JOIN, a bare `json_build_object`, or no matching row at all),
//! the data layer may hand back a plain object, a one-element array, an
//! empty array, `[null]`, or `null`. Every ingress path funnels through
//! here so downstream code only ever sees an object or nothing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Collapse a possibly array-wrapped to-one value to its inner object.
///
/// Arrays yield their first element, with an empty array or a leading
/// `null` element collapsing to `None`. A bare `null` yields `None`.
/// Any other value passes through unchanged.
#[must_use]
pub fn unwrap_to_one(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => match items.into_iter().next() {
            None | Some(Value::Null) => None,
            Some(first) => Some(first),
        },
        Value::Null => None,
        other => Some(other),
    }
}

/// Typed variant of [`unwrap_to_one`]: unwrap, then deserialize.
///
/// Values that unwrap to nothing, or that do not deserialize as `T`,
/// both come out as `None`. A malformed embedded relation never fails
/// the enclosing record.
#[must_use]
pub fn to_one<T: DeserializeOwned>(value: Option<Value>) -> Option<T> {
    value
        .and_then(unwrap_to_one)
        .and_then(|inner| serde_json::from_value(inner).ok())
}

/// Serde adapter applying [`unwrap_to_one`] during deserialization.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on to-one
/// relation fields; `default` covers the absent-key case.
///
/// # Errors
///
/// Returns the deserializer's error when the field is not valid JSON at
/// all; shape mismatches inside the relation collapse to `None` instead.
pub fn deserialize_to_one<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(to_one(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Probe {
        id: String,
    }

    #[test]
    fn unwraps_single_element_array() {
        let out = unwrap_to_one(json!([{ "id": "x" }]));
        assert_eq!(out, Some(json!({ "id": "x" })));
    }

    #[test]
    fn empty_array_is_none() {
        assert_eq!(unwrap_to_one(json!([])), None);
    }

    #[test]
    fn array_of_null_is_none() {
        assert_eq!(unwrap_to_one(json!([null])), None);
    }

    #[test]
    fn null_is_none() {
        assert_eq!(unwrap_to_one(Value::Null), None);
    }

    #[test]
    fn plain_object_passes_through() {
        let out = unwrap_to_one(json!({ "id": "y" }));
        assert_eq!(out, Some(json!({ "id": "y" })));
    }

    #[test]
    fn multi_element_array_keeps_first() {
        let out = unwrap_to_one(json!([{ "id": "first" }, { "id": "second" }]));
        assert_eq!(out, Some(json!({ "id": "first" })));
    }

    #[test]
    fn to_one_deserializes_unwrapped_value() {
        let probe: Option<Probe> = to_one(Some(json!([{ "id": "p" }])));
        assert_eq!(probe, Some(Probe { id: "p".to_string() }));
    }

    #[test]
    fn to_one_malformed_relation_is_none() {
        let probe: Option<Probe> = to_one(Some(json!([{ "unexpected": 1 }])));
        assert_eq!(probe, None);
    }

    #[test]
    fn to_one_absent_is_none() {
        let probe: Option<Probe> = to_one(None);
        assert_eq!(probe, None);
    }
}
