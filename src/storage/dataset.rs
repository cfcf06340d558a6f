//! The factory dataset.
//!
//! The dataset seeds companies and devices on first launch (or when the
//! durable snapshot is rejected) and provides the service class catalog on
//! every launch.

use std::{io, path::Path, sync::LazyLock};

use serde::Deserialize;

use crate::domain::{Class, Company, Device};

static BUNDLED: LazyLock<FactoryDataset> = LazyLock::new(|| {
    FactoryDataset::from_json(include_str!("../../data/data.json"))
        .expect("the bundled dataset must always parse")
});

/// Initial companies, devices and classes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FactoryDataset {
    /// Companies present on first launch.
    #[serde(rename = "Company")]
    pub companies: Vec<Company>,
    /// Devices present on first launch.
    #[serde(rename = "Device")]
    pub devices: Vec<Device>,
    /// The service class catalog.
    #[serde(rename = "Class")]
    pub classes: Vec<Class>,
}

impl FactoryDataset {
    /// Returns the dataset compiled into the binary.
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object with `Company`,
    /// `Device` and `Class` arrays of well-formed records.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a
    /// well-formed dataset.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded factory dataset from {}", path.display());
        Self::from_json(&json)
    }
}

/// Errors that can occur when loading a factory dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),
    /// The dataset is not well-formed.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}
