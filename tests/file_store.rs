//! End-to-end behaviour of an inventory backed by a directory on disk.

use inventory::{
    domain::Hydration, ClassCatalog, Device, FactoryDataset, FileStore, Inventory, NewCompany,
};
use tempfile::TempDir;

fn open(tmp: &TempDir) -> (Inventory<FileStore>, Hydration) {
    let store = FileStore::new(tmp.path().to_path_buf());
    let mut inventory = Inventory::new(store, ClassCatalog::bundled());
    let hydration = inventory.hydrate(FactoryDataset::bundled());
    (inventory, hydration)
}

fn write_snapshot(tmp: &TempDir, json: &str) {
    std::fs::write(tmp.path().join("appData.json"), json).unwrap();
}

#[test]
fn first_launch_seeds_factory_data() {
    let tmp = TempDir::new().unwrap();

    let (inventory, hydration) = open(&tmp);

    assert!(matches!(hydration, Hydration::Defaults));
    assert_eq!(inventory.companies(), FactoryDataset::bundled().companies);
    assert!(tmp.path().join("appData.json").exists());
}

#[test]
fn changes_survive_a_restart() {
    let tmp = TempDir::new().unwrap();
    let (mut inventory, _) = open(&tmp);

    let id = inventory.add_company(NewCompany::named("Acme")).unwrap();
    inventory.add_device(Device::new("ab-cdef-g-01", "10.9.0.1", id, 3));
    inventory.update_device_class("10.1.0.1", 1);
    inventory.delete_device("10.1.0.2");
    let expected = inventory.snapshot().to_snapshot();
    drop(inventory);

    let (reopened, hydration) = open(&tmp);

    assert!(matches!(hydration, Hydration::Restored));
    assert_eq!(reopened.snapshot().to_snapshot(), expected);
}

#[test]
fn invalid_json_restores_factory_data() {
    let tmp = TempDir::new().unwrap();
    write_snapshot(&tmp, "this is not json");

    let (inventory, hydration) = open(&tmp);

    assert!(matches!(hydration, Hydration::Fallback(_)));
    assert_eq!(inventory.companies(), FactoryDataset::bundled().companies);
    assert_eq!(inventory.devices(), FactoryDataset::bundled().devices);
}

#[test]
fn partial_snapshot_is_never_mixed_with_factory_data() {
    let tmp = TempDir::new().unwrap();
    write_snapshot(
        &tmp,
        r#"{"companies":[{"id":1,"name":"Acme","phone":"111","city":"X","location":"Y"}]}"#,
    );

    let (inventory, hydration) = open(&tmp);

    assert!(matches!(hydration, Hydration::Fallback(_)));
    assert_eq!(inventory.companies(), FactoryDataset::bundled().companies);
    assert_eq!(inventory.devices(), FactoryDataset::bundled().devices);
}

#[test]
fn company_missing_phone_restores_factory_data() {
    let tmp = TempDir::new().unwrap();
    write_snapshot(
        &tmp,
        r#"{"companies":[{"id":1,"name":"Acme"}],"devices":[]}"#,
    );

    let (inventory, _) = open(&tmp);

    assert_eq!(inventory.companies(), FactoryDataset::bundled().companies);
    assert_eq!(inventory.devices(), FactoryDataset::bundled().devices);
}

#[test]
fn restored_snapshot_is_used_verbatim() {
    let tmp = TempDir::new().unwrap();
    write_snapshot(
        &tmp,
        r#"{"companies":[{"id":1,"name":"Acme","phone":"111","city":"X","location":"Y"}],"devices":[]}"#,
    );

    let (mut inventory, hydration) = open(&tmp);
    inventory.add_device(Device::new("ab-cdef-g-01", "10.0.0.1", 1, 2));

    assert!(matches!(hydration, Hydration::Restored));
    assert_eq!(inventory.companies().len(), 1);
    assert_eq!(
        inventory.devices(),
        [Device::new("ab-cdef-g-01", "10.0.0.1", 1, 2)]
    );
    assert!(inventory.premium_companies().is_empty());
}
