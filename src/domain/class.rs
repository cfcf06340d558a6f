use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a service class.
pub type ClassId = u32;

/// The tier name that marks a device as premium.
///
/// Matching is exact and case-sensitive.
pub const PREMIUM: &str = "premium";

/// A fixed service tier associated with a device.
///
/// Classes are loaded once from the bundled dataset and never change at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// The class identifier referenced by [`Device::class_id`](crate::Device).
    pub id: ClassId,
    /// The tier name, for example `basic` or `premium`.
    #[serde(rename = "type")]
    pub tier: String,
    /// Recovery-time descriptor.
    ///
    /// Numeric descriptors in the dataset are normalised to their decimal
    /// string form.
    #[serde(deserialize_with = "recovery_descriptor")]
    pub recovery: String,
}

impl Class {
    /// Whether devices of this class count as premium.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.tier == PREMIUM
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tier, self.recovery)
    }
}

fn recovery_descriptor<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Descriptor {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Descriptor::deserialize(deserializer)? {
        Descriptor::Text(text) => text,
        Descriptor::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_match_is_case_sensitive() {
        let premium: Class =
            serde_json::from_str(r#"{"id": 3, "type": "premium", "recovery": "4h"}"#).unwrap();
        let shouting: Class =
            serde_json::from_str(r#"{"id": 5, "type": "Premium", "recovery": "4h"}"#).unwrap();

        assert!(premium.is_premium());
        assert!(!shouting.is_premium());
    }

    #[test]
    fn numeric_recovery_is_normalised() {
        let class: Class =
            serde_json::from_str(r#"{"id": 1, "type": "basic", "recovery": 72}"#).unwrap();
        assert_eq!(class.recovery, "72");
    }

    #[test]
    fn serialises_tier_as_type() {
        let class = Class {
            id: 2,
            tier: "plus".to_string(),
            recovery: "24h".to_string(),
        };
        let value = serde_json::to_value(&class).unwrap();
        assert_eq!(value["type"], "plus");
        assert_eq!(class.to_string(), "plus (24h)");
    }
}
