//! The checks a caller performs before handing a candidate to the
//! [`Inventory`](crate::Inventory).
//!
//! [`Inventory::add_device`](crate::Inventory::add_device) and
//! [`Inventory::add_company`](crate::Inventory::add_company) trust their
//! input. Duplicate IPs and company names are only caught here.

use std::fmt;

use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;

use crate::domain::{
    device::{is_valid_ip, is_valid_name},
    ClassCatalog, ClassId, Company, CompanyId, CompanyIndex, Device, NewCompany,
};

/// The candidate field a [`FieldError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The device name.
    Device,
    /// The device IP address.
    Ip,
    /// The owning company of a device.
    Company,
    /// The service class of a device.
    Class,
    /// The name of a company.
    Name,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Device => "device",
            Self::Ip => "ip",
            Self::Company => "company",
            Self::Class => "class",
            Self::Name => "name",
        })
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Problem {
    /// The field is empty.
    #[error("required")]
    Required,
    /// The device name does not follow the naming scheme.
    #[error("invalid device name (expected e.g. ab-abcd-a-01)")]
    InvalidDeviceName,
    /// The IP address is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address")]
    InvalidIp,
    /// Another device already uses the IP address.
    #[error("IP address already in use")]
    IpTaken,
    /// The referenced company does not exist.
    #[error("company {0} does not exist")]
    UnknownCompany(CompanyId),
    /// The referenced class does not exist.
    #[error("class {0} does not exist")]
    UnknownClass(ClassId),
    /// A company with the same name (ignoring case) already exists.
    #[error("a company named '{0}' already exists")]
    NameTaken(String),
}

/// A rejected candidate field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {problem}")]
pub struct FieldError {
    /// The rejected field.
    pub field: Field,
    /// Why it was rejected.
    pub problem: Problem,
}

impl FieldError {
    const fn new(field: Field, problem: Problem) -> Self {
        Self { field, problem }
    }
}

/// Validates a new device against the current devices, companies and
/// classes.
///
/// At most one error is reported per field.
///
/// # Errors
///
/// Returns every field that failed validation.
pub fn validate_device(
    candidate: &Device,
    devices: &[Device],
    companies: &CompanyIndex,
    classes: &ClassCatalog,
) -> Result<(), NonEmpty<FieldError>> {
    let mut errors = Vec::new();

    if candidate.device.trim().is_empty() {
        errors.push(FieldError::new(Field::Device, Problem::Required));
    } else if !is_valid_name(&candidate.device) {
        errors.push(FieldError::new(Field::Device, Problem::InvalidDeviceName));
    }

    if candidate.ip.trim().is_empty() {
        errors.push(FieldError::new(Field::Ip, Problem::Required));
    } else if !is_valid_ip(&candidate.ip) {
        errors.push(FieldError::new(Field::Ip, Problem::InvalidIp));
    } else if devices.iter().any(|device| device.ip == candidate.ip) {
        errors.push(FieldError::new(Field::Ip, Problem::IpTaken));
    }

    if candidate.company_id == 0 {
        errors.push(FieldError::new(Field::Company, Problem::Required));
    } else if !companies.contains_key(&candidate.company_id) {
        errors.push(FieldError::new(
            Field::Company,
            Problem::UnknownCompany(candidate.company_id),
        ));
    }

    if !classes.contains(candidate.class_id) {
        errors.push(FieldError::new(
            Field::Class,
            Problem::UnknownClass(candidate.class_id),
        ));
    }

    NonEmpty::from_vec(errors).map_or(Ok(()), Err)
}

/// Validates a new company against the existing companies.
///
/// Returns the trimmed name on success.
///
/// # Errors
///
/// Returns an error if the name is blank or already used by another company,
/// ignoring case and surrounding whitespace.
pub fn validate_company(
    candidate: &NewCompany,
    companies: &[Company],
) -> Result<NonEmptyString, NonEmpty<FieldError>> {
    let name = NonEmptyString::new(candidate.name.trim().to_string())
        .map_err(|_| NonEmpty::new(FieldError::new(Field::Name, Problem::Required)))?;

    let key = name.as_str().to_lowercase();
    if let Some(existing) = companies
        .iter()
        .find(|company| company.name.trim().to_lowercase() == key)
    {
        return Err(NonEmpty::new(FieldError::new(
            Field::Name,
            Problem::NameTaken(existing.name.clone()),
        )));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::index::build_company_index;

    fn companies() -> Vec<Company> {
        vec![NewCompany::named("Acme").into_company(1)]
    }

    fn check(candidate: &Device) -> Vec<FieldError> {
        let devices = [Device::new("ab-abcd-a-01", "10.0.0.1", 1, 1)];
        let index = build_company_index(&companies());
        validate_device(candidate, &devices, &index, &ClassCatalog::bundled())
            .err()
            .map(Vec::from)
            .unwrap_or_default()
    }

    #[test]
    fn accepts_valid_device() {
        assert!(check(&Device::new("ab-abcd-a-02", "10.0.0.2", 1, 3)).is_empty());
    }

    #[test_case("", Problem::Required; "empty name")]
    #[test_case("   ", Problem::Required; "blank name")]
    #[test_case("AB-ABCD-A-01", Problem::InvalidDeviceName; "uppercase name")]
    fn rejects_bad_device_name(name: &str, problem: Problem) {
        let errors = check(&Device::new(name, "10.0.0.2", 1, 1));
        assert_eq!(errors, [FieldError::new(Field::Device, problem)]);
    }

    #[test_case("", Problem::Required; "empty ip")]
    #[test_case("10.0.0.256", Problem::InvalidIp; "octet out of range")]
    #[test_case("10.0.0.1", Problem::IpTaken; "ip in use")]
    fn rejects_bad_ip(ip: &str, problem: Problem) {
        let errors = check(&Device::new("ab-abcd-a-02", ip, 1, 1));
        assert_eq!(errors, [FieldError::new(Field::Ip, problem)]);
    }

    #[test_case(0, Problem::Required; "no company selected")]
    #[test_case(7, Problem::UnknownCompany(7); "unknown company")]
    fn rejects_bad_company(company_id: CompanyId, problem: Problem) {
        let errors = check(&Device::new("ab-abcd-a-02", "10.0.0.2", company_id, 1));
        assert_eq!(errors, [FieldError::new(Field::Company, problem)]);
    }

    #[test]
    fn rejects_unknown_class() {
        let errors = check(&Device::new("ab-abcd-a-02", "10.0.0.2", 1, 9));
        assert_eq!(
            errors,
            [FieldError::new(Field::Class, Problem::UnknownClass(9))]
        );
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = check(&Device::new("nope", "nope", 0, 0));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [Field::Device, Field::Ip, Field::Company, Field::Class]
        );
    }

    #[test]
    fn company_name_is_trimmed() {
        let name = validate_company(&NewCompany::named("  Beta "), &companies()).unwrap();
        assert_eq!(name.as_str(), "Beta");
    }

    #[test_case(""; "empty")]
    #[test_case("  "; "whitespace only")]
    fn blank_company_name_is_required(name: &str) {
        let errors = validate_company(&NewCompany::named(name), &companies()).unwrap_err();
        assert_eq!(errors.head, FieldError::new(Field::Name, Problem::Required));
    }

    #[test_case("Acme"; "exact")]
    #[test_case("ACME"; "upper case")]
    #[test_case(" acme "; "padded lower case")]
    fn duplicate_company_name_is_rejected(name: &str) {
        let errors = validate_company(&NewCompany::named(name), &companies()).unwrap_err();
        assert_eq!(
            errors.head,
            FieldError::new(Field::Name, Problem::NameTaken("Acme".to_string()))
        );
    }

    #[test]
    fn error_display_names_the_field() {
        let error = FieldError::new(Field::Ip, Problem::IpTaken);
        assert_eq!(error.to_string(), "ip: IP address already in use");
    }
}
