//! Domain models for the inventory.
//!
//! This module contains the core domain types (companies, devices and service
//! classes), the state container that owns them, and the derived lookup
//! indices and reports built on top.

mod catalog;
pub use catalog::ClassCatalog;

/// Service classes (tiers).
pub mod class;
pub use class::{Class, ClassId};

/// Companies and company candidates.
pub mod company;
pub use company::{Company, CompanyId, IdsExhausted, NewCompany};

mod config;
pub use config::{Config, ConfigError};

/// Network devices and their identifier formats.
pub mod device;
pub use device::Device;

/// Caller-side validation of new devices and companies.
pub mod form;
pub use form::FieldError;

/// Id-keyed lookup indices.
pub mod index;
pub use index::{ClassIndex, CompanyIndex};

mod inventory;
pub use inventory::{AddCompanyError, Hydration, Inventory, SubscriptionId};

mod lenient;

/// Reporting over the current snapshot.
pub mod report;
pub use report::PremiumCompany;
