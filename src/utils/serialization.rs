// src/utils/serialization.rs
//! Serialization utilities for the certificate viewer.
//!
//! Canonical hashing depends on the exact bytes produced here, so all JSON
//! written for hashing goes through [`to_canonical_json`].

use serde::{Deserialize, Serialize};
use serde_json;

/// Serializes a value to a compact JSON string.
///
/// Field order follows the declaration order of the serialized type and no
/// whitespace is emitted. String escaping matches `JSON.stringify`: quotes,
/// backslashes and control characters are escaped, everything else
/// (including non-ASCII text and `/`) is written verbatim.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(String)` with JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn to_canonical_json<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Serializes a value to indented JSON for human consumption.
pub fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Deserializes a value from a JSON string.
///
/// # Arguments
/// * `data` - JSON string to deserialize
///
/// # Returns
/// - `Ok(T)` with deserialized value on success
/// - `Err(serde_json::Error)` if deserialization fails
pub fn deserialize<'a, T: Deserialize<'a>>(data: &'a str) -> Result<T, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample<'a> {
        z: &'a str,
        a: u64,
    }

    #[test]
    fn test_canonical_json_keeps_declaration_order() {
        let json = to_canonical_json(&Sample { z: "first", a: 2 }).unwrap();
        assert_eq!(json, r#"{"z":"first","a":2}"#);
    }

    #[test]
    fn test_canonical_json_escaping() {
        let json = to_canonical_json(&Sample { z: "a\"b\\c\nd\te/f 証明\u{1}", a: 0 }).unwrap();
        assert_eq!(json, "{\"z\":\"a\\\"b\\\\c\\nd\\te/f 証明\\u0001\",\"a\":0}");
    }

    #[test]
    fn test_deserialize_round_trip_value() {
        let value: serde_json::Value = deserialize(r#"{"z":"x","a":1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }
}
