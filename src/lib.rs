//! Company, Device and Service Class Inventory
//!
//! The inventory tracks companies, their network devices and a fixed catalog
//! of service classes. Companies and devices are persisted as a single
//! snapshot in a key-value store; classes come from the bundled dataset.

pub mod domain;
pub use domain::{
    Class, ClassCatalog, ClassId, Company, CompanyId, Config, Device, FieldError, Inventory,
    NewCompany,
};

/// Key-value storage, snapshot persistence and the factory dataset.
pub mod storage;
pub use storage::{FactoryDataset, FileStore, KeyValueStore, MemoryStore, Snapshot};
