mod dataset;
/// Key-value stores holding the durable snapshot.
pub mod kv;
/// Shape validation of persisted records.
pub mod schema;
mod snapshot;

pub use dataset::{DatasetError, FactoryDataset};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use schema::Validation;
pub use snapshot::{
    load_snapshot, persist_snapshot, Loaded, Snapshot, SnapshotError, SnapshotRef, STORAGE_KEY,
};
