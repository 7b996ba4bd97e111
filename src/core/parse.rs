use crate::domain::model::{Dataset, Record};
use crate::utils::error::{Result, SiftError};
use serde_json::{Map, Value};

/// Parses JSON text into a dataset.
///
/// An array is taken as-is. An object yields its values in the order a
/// browser enumerates them: array-index keys ascending, then the other keys in
/// insertion order. Any other top-level value has no enumerable members and
/// yields an empty dataset.
pub fn parse_str(text: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(text).map_err(|e| SiftError::parse(e.to_string()))?;
    Ok(normalize(value))
}

/// Like [`parse_str`], for raw file contents.
pub fn parse_bytes(bytes: &[u8]) -> Result<Dataset> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SiftError::parse(format!("input is not UTF-8 text: {}", e)))?;
    parse_str(text.strip_prefix('\u{feff}').unwrap_or(text))
}

pub fn normalize(value: Value) -> Dataset {
    match value {
        Value::Array(items) => Dataset::from(items),
        Value::Object(map) => object_values(map),
        other => {
            tracing::debug!("Top-level JSON is a {}, producing no records", kind(&other));
            Dataset::default()
        }
    }
}

fn object_values(map: Map<String, Value>) -> Dataset {
    let mut indexed: Vec<(u32, Value)> = Vec::new();
    let mut named: Vec<Value> = Vec::with_capacity(map.len());

    for (key, value) in map {
        match array_index(&key) {
            Some(idx) => indexed.push((idx, value)),
            None => named.push(value),
        }
    }

    indexed.sort_by_key(|(idx, _)| *idx);

    indexed
        .into_iter()
        .map(|(_, v)| v)
        .chain(named)
        .map(Record::new)
        .collect()
}

// canonical decimal form below 2^32 - 1, e.g. "0", "17"; not "017" or "-1"
fn array_index(key: &str) -> Option<u32> {
    let idx: u32 = key.parse().ok()?;
    if idx == u32::MAX || idx.to_string() != key {
        return None;
    }
    Some(idx)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_is_used_directly() {
        let dataset = parse_str(r#"[{"id":3},{"id":1},{"name":"x"}]"#).unwrap();
        assert_eq!(dataset.to_value(), json!([{"id": 3}, {"id": 1}, {"name": "x"}]));
    }

    #[test]
    fn test_object_values_in_enumeration_order() {
        let dataset = parse_str(r#"{"a":{"id":1},"b":{"id":2}}"#).unwrap();
        assert_eq!(dataset.to_value(), json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn test_integer_keys_enumerate_first_ascending() {
        let dataset = parse_str(r#"{"b":"B","10":"ten","a":"A","2":"two","02":"zero-two"}"#).unwrap();
        assert_eq!(dataset.to_value(), json!(["two", "ten", "B", "A", "zero-two"]));
    }

    #[test]
    fn test_primitive_top_level_is_empty() {
        assert!(parse_str("42").unwrap().is_empty());
        assert!(parse_str("\"text\"").unwrap().is_empty());
        assert!(parse_str("null").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_str("{not json").unwrap_err();
        assert!(matches!(err, SiftError::ParseError { .. }));
        assert!(matches!(parse_str("").unwrap_err(), SiftError::ParseError { .. }));
    }

    #[test]
    fn test_parse_bytes_handles_bom_and_rejects_binary() {
        let dataset = parse_bytes("\u{feff}[1,2]".as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(matches!(parse_bytes(&[0xff, 0xfe, 0x00]), Err(SiftError::ParseError { .. })));
    }
}
