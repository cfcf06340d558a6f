use std::collections::HashMap;

use crate::domain::{Class, ClassId, Company, CompanyId};

/// Companies keyed by id.
pub type CompanyIndex = HashMap<CompanyId, Company>;

/// Service classes keyed by id.
pub type ClassIndex = HashMap<ClassId, Class>;

/// Builds the `company_id → Company` index.
///
/// If two companies share an id, the later one wins.
#[must_use]
pub fn build_company_index(companies: &[Company]) -> CompanyIndex {
    companies
        .iter()
        .map(|company| (company.id, company.clone()))
        .collect()
}

/// Builds the `class_id → Class` index.
///
/// If two classes share an id, the later one wins.
#[must_use]
pub fn build_class_index(classes: &[Class]) -> ClassIndex {
    classes
        .iter()
        .map(|class| (class.id, class.clone()))
        .collect()
}
