use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{lenient, ClassId, CompanyId};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}-[a-z]{4}-[a-z]-[0-9]{2}$").expect("device name pattern is valid")
});

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let octet = "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    Regex::new(&format!(r"^{octet}\.{octet}\.{octet}\.{octet}$"))
        .expect("IPv4 pattern is valid")
});

/// A network device belonging to a company.
///
/// Devices are identified by their IP address, which is unique within the
/// inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// The owning company.
    pub company_id: CompanyId,
    /// The device name, for example `ab-abcd-a-01`.
    pub device: String,
    /// Dotted-quad IPv4 address.
    pub ip: String,
    /// The service class of the device.
    ///
    /// Older snapshots may lack this field or hold something other than a
    /// class id; it then reads as `0`, which never resolves to a class.
    #[serde(default, deserialize_with = "lenient::class_id")]
    pub class_id: ClassId,
}

impl Device {
    /// Creates a device record.
    #[must_use]
    pub fn new(
        device: impl Into<String>,
        ip: impl Into<String>,
        company_id: CompanyId,
        class_id: ClassId,
    ) -> Self {
        Self {
            company_id,
            device: device.into(),
            ip: ip.into(),
            class_id,
        }
    }
}

/// Checks a device name against the `xx-xxxx-x-00` naming scheme.
///
/// Two lowercase letters, four lowercase letters, one lowercase letter and two
/// digits, separated by hyphens.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Checks that `ip` is a dotted-quad IPv4 address with every octet in
/// `0..=255`.
///
/// Up to three digits are accepted per octet, so `010.000.000.001` is valid.
#[must_use]
pub fn is_valid_ip(ip: &str) -> bool {
    IPV4_PATTERN.is_match(ip)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("ab-abcd-a-01"; "canonical example")]
    #[test_case("bp-core-r-99"; "upper bound digits")]
    #[test_case("zz-zzzz-z-00"; "all z")]
    fn valid_names(name: &str) {
        assert!(is_valid_name(name));
    }

    #[test_case(""; "empty")]
    #[test_case("AB-abcd-a-01"; "uppercase prefix")]
    #[test_case("ab-abc-a-01"; "short middle segment")]
    #[test_case("ab-abcd-ab-01"; "long third segment")]
    #[test_case("ab-abcd-a-1"; "single digit")]
    #[test_case("ab-abcd-a-001"; "three digits")]
    #[test_case("ab_abcd_a_01"; "underscores")]
    #[test_case(" ab-abcd-a-01"; "leading space")]
    fn invalid_names(name: &str) {
        assert!(!is_valid_name(name));
    }

    #[test_case("10.0.0.1"; "private")]
    #[test_case("0.0.0.0"; "unspecified")]
    #[test_case("255.255.255.255"; "broadcast")]
    #[test_case("192.168.001.010"; "leading zeros")]
    fn valid_ips(ip: &str) {
        assert!(is_valid_ip(ip));
    }

    #[test_case(""; "empty")]
    #[test_case("256.0.0.1"; "octet too large")]
    #[test_case("10.0.0"; "three octets")]
    #[test_case("10.0.0.1.5"; "five octets")]
    #[test_case("10.0.0.-1"; "negative")]
    #[test_case("a.b.c.d"; "letters")]
    #[test_case("10.0.0.1 "; "trailing space")]
    #[test_case("1000.0.0.1"; "four digit octet")]
    fn invalid_ips(ip: &str) {
        assert!(!is_valid_ip(ip));
    }

    #[test]
    fn missing_class_defaults_to_zero() {
        let device: Device =
            serde_json::from_str(r#"{"company_id": 1, "device": "ab-abcd-a-01", "ip": "10.0.0.1"}"#)
                .unwrap();
        assert_eq!(device.class_id, 0);
    }
}
