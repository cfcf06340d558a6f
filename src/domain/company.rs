use serde::{Deserialize, Serialize};

use crate::domain::lenient;

/// Identifier of a company, assigned by the [`Inventory`](crate::Inventory).
///
/// Stored snapshots may carry any integer id, including negative ones.
pub type CompanyId = i64;

/// Every id above the largest existing company id is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no company id is left after {0}")]
pub struct IdsExhausted(pub CompanyId);

/// A company owning network devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier. Never reused.
    pub id: CompanyId,
    /// Display name. Compared case-insensitively when checking for duplicates.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// City the company is based in.
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: String,
    /// Free-form location, such as a postal code.
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
}

/// A company that has not been assigned an identifier yet.
///
/// Missing optional fields are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCompany {
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// City the company is based in.
    pub city: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
}

impl NewCompany {
    /// Creates a candidate with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Assigns `id` and fills in missing optional fields.
    pub(crate) fn into_company(self, id: CompanyId) -> Company {
        Company {
            id,
            name: self.name,
            phone: self.phone.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        }
    }
}

/// Returns the identifier the next company should receive.
///
/// This is one more than the largest existing id, or `1` if there are no
/// companies. Gaps are never filled and ids handed out are always positive.
pub(crate) fn next_id(companies: &[Company]) -> Result<CompanyId, IdsExhausted> {
    companies
        .iter()
        .map(|company| company.id)
        .max()
        .map_or(Ok(1), |max| {
            max.checked_add(1).map(|id| id.max(1)).ok_or(IdsExhausted(max))
        })
}
