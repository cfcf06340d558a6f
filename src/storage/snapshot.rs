//! The durable snapshot of companies and devices.
//!
//! The snapshot is stored as a single JSON value of shape
//! `{"companies": [...], "devices": [...]}` under [`STORAGE_KEY`]. Classes are
//! never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{Company, Device},
    storage::{
        schema::{validate_all, validate_company, validate_device, Validation},
        KeyValueStore, StoreError,
    },
};

/// The key the snapshot is stored under.
pub const STORAGE_KEY: &str = "appData";

/// An owned snapshot of companies and devices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All companies.
    pub companies: Vec<Company>,
    /// All devices.
    pub devices: Vec<Device>,
}

impl Snapshot {
    /// Borrows the snapshot.
    #[must_use]
    pub fn borrowed(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            companies: &self.companies,
            devices: &self.devices,
        }
    }
}

/// A borrowed snapshot, as published to subscribers and written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotRef<'a> {
    /// All companies.
    pub companies: &'a [Company],
    /// All devices.
    pub devices: &'a [Device],
}

impl SnapshotRef<'_> {
    /// Clones the borrowed lists into an owned snapshot.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            companies: self.companies.to_vec(),
            devices: self.devices.to_vec(),
        }
    }
}

/// The result of reading the snapshot from a store.
#[derive(Debug)]
pub enum Loaded {
    /// A valid snapshot was found.
    Restored(Snapshot),
    /// Nothing is stored under the key.
    NoData,
    /// Something is stored, but it could not be trusted.
    Rejected(SnapshotError),
}

/// Reasons a stored snapshot is rejected or cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The store could not be accessed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored text is not valid JSON.
    #[error("stored snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// The `companies` list is missing or contains an invalid company.
    #[error("invalid companies: {0}")]
    Companies(String),
    /// The `devices` list is missing or contains an invalid device.
    #[error("invalid devices: {0}")]
    Devices(String),
    /// The snapshot could not be serialised.
    #[error("failed to serialise snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Reads and validates the snapshot stored in `store`.
///
/// Both lists must be present and every element must pass its shape check;
/// otherwise the whole snapshot is rejected. The caller decides how to fall
/// back.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Loaded {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Loaded::NoData,
        Err(e) => return Loaded::Rejected(e.into()),
    };

    match parse_snapshot(&raw) {
        Ok(snapshot) => Loaded::Restored(snapshot),
        Err(e) => Loaded::Rejected(e),
    }
}

fn parse_snapshot(raw: &str) -> Result<Snapshot, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;

    let companies = match validate_all(value.get("companies"), validate_company) {
        Validation::Valid(companies) => companies,
        Validation::Invalid(reason) => return Err(SnapshotError::Companies(reason)),
    };
    let devices = match validate_all(value.get("devices"), validate_device) {
        Validation::Valid(devices) => devices,
        Validation::Invalid(reason) => return Err(SnapshotError::Devices(reason)),
    };

    Ok(Snapshot { companies, devices })
}

/// Serialises `snapshot` and writes it to `store`, replacing the previous
/// value.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialised or the store cannot
/// be written.
pub fn persist_snapshot<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshot: SnapshotRef<'_>,
    pretty: bool,
) -> Result<(), SnapshotError> {
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .map_err(SnapshotError::Serialize)?;

    store.set(STORAGE_KEY, json)?;
    Ok(())
}
