//! Structural checks applied to records read back from the store.
//!
//! Persisted data is untrusted: it may have been written by an older build or
//! edited by hand. A record must carry the identifying fields with the right
//! JSON types before it is converted into a domain type. The remaining fields
//! are read leniently, so a record that passes the shape check always
//! converts.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Company, Device};

/// The outcome of validating an untrusted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    /// The value has the expected shape.
    Valid(T),
    /// The value was rejected, with a human-readable reason.
    Invalid(String),
}

#[derive(Clone, Copy)]
enum Expect {
    Integer,
    String,
}

impl Expect {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64(),
            Self::String => value.is_string(),
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::String => "a string",
        }
    }
}

fn check<T: DeserializeOwned>(value: &Value, fields: &[(&str, Expect)]) -> Validation<T> {
    let Some(object) = value.as_object() else {
        return Validation::Invalid("expected an object".to_string());
    };

    for &(field, expect) in fields {
        match object.get(field) {
            Some(v) if expect.matches(v) => {}
            Some(_) => {
                return Validation::Invalid(format!("'{field}' must be {}", expect.describe()));
            }
            None => return Validation::Invalid(format!("missing '{field}'")),
        }
    }

    match serde_json::from_value(value.clone()) {
        Ok(record) => Validation::Valid(record),
        Err(e) => Validation::Invalid(e.to_string()),
    }
}

/// Validates a persisted company.
///
/// The record must have an integer `id` and string `name` and `phone`.
#[must_use]
pub fn validate_company(value: &Value) -> Validation<Company> {
    check(
        value,
        &[
            ("id", Expect::Integer),
            ("name", Expect::String),
            ("phone", Expect::String),
        ],
    )
}

/// Validates a persisted device.
///
/// The record must have an integer `company_id` and string `device` and
/// `ip`.
#[must_use]
pub fn validate_device(value: &Value) -> Validation<Device> {
    check(
        value,
        &[
            ("company_id", Expect::Integer),
            ("device", Expect::String),
            ("ip", Expect::String),
        ],
    )
}

/// Validates that `value` is an array whose every element passes `validate`.
///
/// The first rejected element determines the reason.
pub fn validate_all<T>(
    value: Option<&Value>,
    validate: impl Fn(&Value) -> Validation<T>,
) -> Validation<Vec<T>> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Validation::Invalid("expected an array".to_string());
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match validate(item) {
            Validation::Valid(record) => records.push(record),
            Validation::Invalid(reason) => {
                return Validation::Invalid(format!("element {i}: {reason}"));
            }
        }
    }
    Validation::Valid(records)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn company(value: &Value) -> Company {
        match validate_company(value) {
            Validation::Valid(company) => company,
            Validation::Invalid(reason) => panic!("company rejected: {reason}"),
        }
    }

    fn device(value: &Value) -> Device {
        match validate_device(value) {
            Validation::Valid(device) => device,
            Validation::Invalid(reason) => panic!("device rejected: {reason}"),
        }
    }

    #[test]
    fn accepts_complete_company() {
        let company = company(
            &json!({"id": 1, "name": "Acme", "phone": "111", "city": "X", "location": "Y"}),
        );

        assert_eq!(company.id, 1);
        assert_eq!(company.city, "X");
    }

    #[test]
    fn company_without_phone_is_invalid() {
        let value = json!({"id": 1, "name": "Acme"});

        assert_eq!(
            validate_company(&value),
            Validation::Invalid("missing 'phone'".to_string())
        );
    }

    #[test_case(json!("1"); "string")]
    #[test_case(json!(1.5); "fractional")]
    #[test_case(json!(1e30); "beyond i64")]
    fn company_id_must_be_an_integer(id: Value) {
        let value = json!({"id": id, "name": "Acme", "phone": "111"});

        assert_eq!(
            validate_company(&value),
            Validation::Invalid("'id' must be an integer".to_string())
        );
    }

    #[test_case(-4; "negative")]
    #[test_case(0; "zero")]
    #[test_case(5_000_000_000; "beyond u32")]
    fn any_integer_company_id_is_accepted(id: i64) {
        let company = company(&json!({"id": id, "name": "Acme", "phone": "111"}));
        assert_eq!(company.id, id);
    }

    #[test]
    fn unchecked_company_fields_never_reject_the_record() {
        let company = company(&json!({
            "id": 1,
            "name": "Acme",
            "phone": "111",
            "city": null,
            "location": {"zip": "9020"},
        }));

        assert_eq!(company.city, "");
        assert_eq!(company.location, "");
    }

    #[test]
    fn device_without_class_is_valid() {
        let device = device(&json!({"company_id": 1, "device": "ab-abcd-a-01", "ip": "10.0.0.1"}));
        assert_eq!(device.class_id, 0);
    }

    #[test_case(json!("2"); "numeric string")]
    #[test_case(json!(null); "null")]
    #[test_case(json!(-2); "negative")]
    fn unexpected_class_id_reads_as_unknown(class_id: Value) {
        let device = device(&json!({
            "company_id": 1,
            "device": "ab-abcd-a-01",
            "ip": "10.0.0.1",
            "class_id": class_id,
        }));
        assert_eq!(device.class_id, 0);
    }

    #[test]
    fn device_with_numeric_ip_is_invalid() {
        let value = json!({"company_id": 1, "device": "ab-abcd-a-01", "ip": 10});
        assert_eq!(
            validate_device(&value),
            Validation::Invalid("'ip' must be a string".to_string())
        );
    }

    #[test]
    fn non_object_is_invalid() {
        assert_eq!(
            validate_device(&json!("ab-abcd-a-01")),
            Validation::Invalid("expected an object".to_string())
        );
    }

    #[test]
    fn validate_all_requires_an_array() {
        let expected = Validation::Invalid("expected an array".to_string());
        let value = json!({"not": "an array"});

        assert_eq!(validate_all(Some(&value), validate_device), expected);
        assert_eq!(validate_all(None, validate_device), expected);
    }

    #[test]
    fn validate_all_reports_first_bad_element() {
        let value = json!([
            {"company_id": 1, "device": "ab-abcd-a-01", "ip": "10.0.0.1"},
            {"company_id": 1, "device": "ab-abcd-a-02"},
        ]);

        assert_eq!(
            validate_all(Some(&value), validate_device),
            Validation::Invalid("element 1: missing 'ip'".to_string())
        );
    }

    #[test]
    fn empty_array_is_valid() {
        let value = json!([]);
        assert_eq!(
            validate_all(Some(&value), validate_company),
            Validation::Valid(Vec::new())
        );
    }
}
