//! The inventory state container.
//!
//! The [`Inventory`] is the single source of truth for companies and devices.
//! It knows nothing about how the snapshot is stored beyond the
//! [`KeyValueStore`] it is handed.

use std::fmt;

use nonempty::NonEmpty;
use tracing::instrument;

use crate::{
    domain::{
        company::next_id,
        form,
        index::{build_company_index, ClassIndex, CompanyIndex},
        report::{premium_companies, PremiumCompany},
        Class, ClassCatalog, ClassId, Company, CompanyId, Device, FieldError, IdsExhausted,
        NewCompany,
    },
    storage::{
        load_snapshot, persist_snapshot, FactoryDataset, KeyValueStore, Loaded, SnapshotError,
        SnapshotRef,
    },
};

type Listener = Box<dyn FnMut(SnapshotRef<'_>)>;

/// Handle returned by [`Inventory::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Why [`Inventory::try_add_company`] refused a candidate.
#[derive(Debug, thiserror::Error)]
pub enum AddCompanyError {
    /// The candidate failed validation.
    #[error("the company candidate is invalid")]
    Invalid(NonEmpty<FieldError>),
    /// No id is left for a new company.
    #[error(transparent)]
    Exhausted(#[from] IdsExhausted),
}

/// Where the state came from when the inventory was hydrated.
#[derive(Debug)]
pub enum Hydration {
    /// The durable snapshot was valid and has been restored.
    Restored,
    /// The store was empty, so the factory dataset was loaded.
    Defaults,
    /// The durable snapshot was rejected and the factory dataset was loaded
    /// instead.
    Fallback(SnapshotError),
    /// The inventory had already been hydrated; nothing was loaded.
    AlreadyHydrated,
}

/// The authoritative in-memory companies and devices.
///
/// Every mutation fully updates the in-memory state before returning, rebuilds
/// the affected lookup index, notifies subscribers and, once the inventory has
/// been [hydrated](Self::hydrate), writes the snapshot back to the store.
///
/// Nothing is written to the store before hydration, so an empty container can
/// never clobber previously stored data.
pub struct Inventory<S> {
    companies: Vec<Company>,
    devices: Vec<Device>,
    catalog: ClassCatalog,
    companies_map: CompanyIndex,

    store: S,
    hydrated: bool,
    pretty: bool,

    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S> fmt::Debug for Inventory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("companies", &self.companies.len())
            .field("devices", &self.devices.len())
            .field("classes", &self.catalog.classes().len())
            .field("hydrated", &self.hydrated)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Inventory<S> {
    /// Creates an empty, unhydrated inventory backed by `store`.
    #[must_use]
    pub fn new(store: S, catalog: ClassCatalog) -> Self {
        Self {
            companies: Vec::new(),
            devices: Vec::new(),
            catalog,
            companies_map: CompanyIndex::new(),
            store,
            hydrated: false,
            pretty: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Writes the snapshot as indented JSON.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Loads the durable snapshot from the store.
    ///
    /// If the store is empty, or its snapshot fails validation, both lists are
    /// replaced by the factory `defaults`. Durable and factory data are never
    /// mixed. A rejected snapshot is logged and otherwise ignored.
    ///
    /// Hydration happens once. Afterwards every change is persisted,
    /// starting with the freshly loaded state.
    #[instrument(level = "debug", skip_all)]
    pub fn hydrate(&mut self, defaults: &FactoryDataset) -> Hydration {
        if self.hydrated {
            tracing::debug!("Inventory already hydrated");
            return Hydration::AlreadyHydrated;
        }

        let outcome = match load_snapshot(&self.store) {
            Loaded::Restored(snapshot) => {
                tracing::debug!(
                    "Restored {} companies and {} devices",
                    snapshot.companies.len(),
                    snapshot.devices.len()
                );
                self.companies = snapshot.companies;
                self.devices = snapshot.devices;
                Hydration::Restored
            }
            Loaded::NoData => {
                tracing::debug!("No stored snapshot, loading factory defaults");
                self.load_defaults(defaults);
                Hydration::Defaults
            }
            Loaded::Rejected(e) => {
                tracing::error!("Failed to load stored snapshot, using factory defaults: {e}");
                self.load_defaults(defaults);
                Hydration::Fallback(e)
            }
        };

        self.hydrated = true;
        self.changed(true);
        outcome
    }

    fn load_defaults(&mut self, defaults: &FactoryDataset) {
        self.companies.clone_from(&defaults.companies);
        self.devices.clone_from(&defaults.devices);
    }

    /// Whether [`hydrate`](Self::hydrate) has completed.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Appends a device.
    ///
    /// The device is trusted as given: in particular, IP uniqueness is not
    /// re-checked. Callers that need validation use
    /// [`try_add_device`](Self::try_add_device).
    #[instrument(level = "debug", skip(self))]
    pub fn add_device(&mut self, device: Device) {
        tracing::info!("Added device {} ({})", device.device, device.ip);
        self.devices.push(device);
        self.changed(false);
    }

    /// Validates a device candidate and appends it.
    ///
    /// # Errors
    ///
    /// Returns every field that failed validation. Nothing is changed in that
    /// case.
    pub fn try_add_device(&mut self, device: Device) -> Result<(), NonEmpty<FieldError>> {
        form::validate_device(&device, &self.devices, &self.companies_map, &self.catalog)?;
        self.add_device(device);
        Ok(())
    }

    /// Changes the class of the device with the given IP.
    ///
    /// Does nothing if no device has that IP.
    #[instrument(level = "debug", skip(self))]
    pub fn update_device_class(&mut self, ip: &str, class_id: ClassId) {
        let mut found = false;
        for device in self.devices.iter_mut().filter(|device| device.ip == ip) {
            device.class_id = class_id;
            found = true;
        }

        if found {
            tracing::info!("Reclassified device {ip} as class {class_id}");
            self.changed(false);
        } else {
            tracing::debug!("No device with IP {ip}");
        }
    }

    /// Removes the device with the given IP.
    ///
    /// Does nothing if no device has that IP.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_device(&mut self, ip: &str) {
        let before = self.devices.len();
        self.devices.retain(|device| device.ip != ip);

        if self.devices.len() == before {
            tracing::debug!("No device with IP {ip}");
        } else {
            tracing::info!("Deleted device {ip}");
            self.changed(false);
        }
    }

    /// Adds a company and returns its newly assigned id.
    ///
    /// The id is one more than the largest existing id, or `1` for the first
    /// company. Name uniqueness is not checked; callers that need validation
    /// use [`try_add_company`](Self::try_add_company).
    ///
    /// # Errors
    ///
    /// Returns an error, and changes nothing, if the largest existing id is
    /// already `i64::MAX`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_company(&mut self, company: NewCompany) -> Result<CompanyId, IdsExhausted> {
        let id = next_id(&self.companies)?;
        let company = company.into_company(id);
        tracing::info!("Added company {} ({id})", company.name);

        self.companies.push(company);
        self.changed(true);
        Ok(id)
    }

    /// Validates a company candidate, then adds it with a trimmed name.
    ///
    /// # Errors
    ///
    /// Returns every field that failed validation, or an error if no company
    /// id is left. Nothing is changed in either case.
    pub fn try_add_company(
        &mut self,
        mut company: NewCompany,
    ) -> Result<CompanyId, AddCompanyError> {
        let name = form::validate_company(&company, &self.companies)
            .map_err(AddCompanyError::Invalid)?;
        company.name = name.as_str().to_owned();
        self.add_company(company).map_err(AddCompanyError::from)
    }

    /// Registers a listener called with the current snapshot after every
    /// change.
    pub fn subscribe(&mut self, listener: impl FnMut(SnapshotRef<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `false` if the subscription did not exist.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn changed(&mut self, companies_changed: bool) {
        if companies_changed {
            self.companies_map = build_company_index(&self.companies);
        }

        let snapshot = SnapshotRef {
            companies: &self.companies,
            devices: &self.devices,
        };

        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }

        if !self.hydrated {
            return;
        }
        if let Err(e) = persist_snapshot(&mut self.store, snapshot, self.pretty) {
            tracing::warn!("Failed to persist snapshot: {e}");
        }
    }
}

impl<S> Inventory<S> {
    /// All companies, in insertion order.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// All devices, in insertion order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// The service classes of the catalog.
    #[must_use]
    pub fn classes(&self) -> &[Class] {
        self.catalog.classes()
    }

    /// The class catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// The `company_id → Company` index.
    #[must_use]
    pub const fn companies_map(&self) -> &CompanyIndex {
        &self.companies_map
    }

    /// The `class_id → Class` index.
    #[must_use]
    pub const fn classes_map(&self) -> &ClassIndex {
        self.catalog.index()
    }

    /// Looks up a company by id.
    #[must_use]
    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies_map.get(&id)
    }

    /// Looks up a device by IP.
    #[must_use]
    pub fn device(&self, ip: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.ip == ip)
    }

    /// Borrows the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            companies: &self.companies,
            devices: &self.devices,
        }
    }

    /// Companies with at least one premium device, sorted by name.
    #[must_use]
    pub fn premium_companies(&self) -> Vec<PremiumCompany<'_>> {
        premium_companies(&self.companies, &self.devices, self.classes_map())
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
