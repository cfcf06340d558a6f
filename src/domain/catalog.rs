//! The static service class catalog.

use crate::{
    domain::{
        index::{build_class_index, ClassIndex},
        Class, ClassId,
    },
    storage::FactoryDataset,
};

/// The fixed list of service classes.
///
/// The catalog is read-only for its whole lifetime; there are no mutation
/// operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: Vec<Class>,
    index: ClassIndex,
}

impl ClassCatalog {
    /// Creates a catalog from a list of classes.
    #[must_use]
    pub fn new(classes: Vec<Class>) -> Self {
        let index = build_class_index(&classes);
        Self { classes, index }
    }

    /// The catalog of the dataset compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_dataset(FactoryDataset::bundled())
    }

    /// The catalog of the given dataset.
    #[must_use]
    pub fn from_dataset(dataset: &FactoryDataset) -> Self {
        Self::new(dataset.classes.clone())
    }

    /// The classes, in catalog order.
    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Iterates over the classes in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Class> {
        self.classes.iter()
    }

    /// The `class_id → Class` index.
    #[must_use]
    pub const fn index(&self) -> &ClassIndex {
        &self.index
    }

    /// Looks up a class by id.
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<&Class> {
        self.index.get(&id)
    }

    /// Whether the catalog contains a class with the given id.
    #[must_use]
    pub fn contains(&self, id: ClassId) -> bool {
        self.index.contains_key(&id)
    }
}

impl<'a> IntoIterator for &'a ClassCatalog {
    type Item = &'a Class;
    type IntoIter = std::slice::Iter<'a, Class>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
