use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::domain::{ClassIndex, Company, CompanyId, Device};

/// A company together with its number of premium devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumCompany<'a> {
    /// The company.
    #[serde(flatten)]
    pub company: &'a Company,
    /// How many of its devices are in a premium class.
    pub count: usize,
}

/// Lists the companies owning at least one premium device.
///
/// A device is premium when its class resolves through `classes` to a class
/// whose tier is exactly `premium`. Devices with unknown classes are ignored.
/// The result is sorted by company name, ignoring case.
#[must_use]
pub fn premium_companies<'a>(
    companies: &'a [Company],
    devices: &[Device],
    classes: &ClassIndex,
) -> Vec<PremiumCompany<'a>> {
    let mut counts: HashMap<CompanyId, usize> = HashMap::new();
    for device in devices {
        if classes
            .get(&device.class_id)
            .is_some_and(|class| class.is_premium())
        {
            *counts.entry(device.company_id).or_insert(0) += 1;
        }
    }

    let mut premium: Vec<_> = companies
        .iter()
        .filter_map(|company| {
            let count = counts.get(&company.id).copied().unwrap_or(0);
            (count > 0).then_some(PremiumCompany { company, count })
        })
        .collect();

    premium.sort_by(|a, b| by_name(a.company, b.company));
    premium
}

fn by_name(a: &Company, b: &Company) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}
