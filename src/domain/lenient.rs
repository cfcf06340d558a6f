//! Forgiving deserializers for record fields that carry no identity.
//!
//! Stored snapshots may have been written by an older build or edited by
//! hand. Fields outside the checked shape are read as best they can be
//! rather than rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::ClassId;

/// Reads a free-form text field.
///
/// Numbers and booleans keep their JSON text; `null`, arrays and objects read
/// as an empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Reads a class reference.
///
/// Anything other than a non-negative integer in range reads as `0`, which
/// never resolves to a class.
pub fn class_id<'de, D>(deserializer: D) -> Result<ClassId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|id| ClassId::try_from(id).ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "text")]
        text: String,
        #[serde(default, deserialize_with = "class_id")]
        class_id: ClassId,
    }

    fn read(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test_case(json!("Oslo"), "Oslo"; "string")]
    #[test_case(json!(9020), "9020"; "number")]
    #[test_case(json!(true), "true"; "boolean")]
    #[test_case(json!(null), ""; "null")]
    #[test_case(json!(["a"]), ""; "array")]
    fn text_is_coerced(value: serde_json::Value, expected: &str) {
        assert_eq!(read(json!({ "text": value })).text, expected);
    }

    #[test_case(json!(2), 2; "in range")]
    #[test_case(json!("2"), 0; "numeric string")]
    #[test_case(json!(-1), 0; "negative")]
    #[test_case(json!(1.5), 0; "fractional")]
    #[test_case(json!(5_000_000_000_u64), 0; "out of range")]
    #[test_case(json!(null), 0; "null")]
    fn class_id_falls_back_to_zero(value: serde_json::Value, expected: ClassId) {
        assert_eq!(read(json!({ "class_id": value })).class_id, expected);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let record = read(json!({}));
        assert_eq!(record.text, "");
        assert_eq!(record.class_id, 0);
    }
}
