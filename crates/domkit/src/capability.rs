//! Capability Registry
//!
//! Per-category tables of named operations. An operation is only ever
//! added when its name is absent, so natives and earlier installs win.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use domkit_dom::Interface;

/// Host object category a capability is attached to
pub type Category = Interface;

/// Where a capability came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Provided by the host platform itself
    Native,
    /// Installed by this library
    Installed { version: u32 },
}

/// Implementation recorded for a native the host declares but this crate
/// cannot call into. Typed lookups miss it, so handles run their built-in
/// operation while the registry still reports the name as native.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnboundNative;

/// A named operation (or value) on a category
#[derive(Clone)]
pub struct Capability {
    origin: Origin,
    implementation: Arc<dyn Any + Send + Sync>,
}

impl Capability {
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Typed view of the implementation
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.implementation.downcast_ref::<T>()
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Behavior tables for every category
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    version: u32,
    tables: HashMap<Category, BTreeMap<String, Capability>>,
}

impl CapabilityRegistry {
    /// Empty registry stamping installs with `version`
    pub fn new(version: u32) -> Self {
        Self {
            version,
            tables: HashMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Define `name` on `category` unless it is already present
    pub fn install<T: Any + Send + Sync>(&mut self, category: Category, name: &str, implementation: T) {
        let origin = Origin::Installed {
            version: self.version,
        };
        self.insert_absent(category, name, origin, Arc::new(implementation));
    }

    /// Record an operation the host already exposes
    pub fn declare_native<T: Any + Send + Sync>(
        &mut self,
        category: Category,
        name: &str,
        implementation: T,
    ) {
        self.insert_absent(category, name, Origin::Native, Arc::new(implementation));
    }

    fn insert_absent(
        &mut self,
        category: Category,
        name: &str,
        origin: Origin,
        implementation: Arc<dyn Any + Send + Sync>,
    ) {
        let table = self.tables.entry(category).or_default();
        if let Some(existing) = table.get(name) {
            tracing::debug!(
                "{}.{} already present ({:?}), skipping",
                category.name(),
                name,
                existing.origin
            );
            return;
        }
        tracing::debug!("{}.{} <- {:?}", category.name(), name, origin);
        table.insert(
            name.to_string(),
            Capability {
                origin,
                implementation,
            },
        );
    }

    /// Check whether `category` exposes `name`
    pub fn provides(&self, category: Category, name: &str) -> bool {
        self.get(category, name).is_some()
    }

    pub fn get(&self, category: Category, name: &str) -> Option<&Capability> {
        self.tables.get(&category)?.get(name)
    }

    pub fn origin(&self, category: Category, name: &str) -> Option<Origin> {
        self.get(category, name).map(Capability::origin)
    }

    /// Typed implementation of `category.name`; `None` if absent or of another type
    pub fn resolve<T: Any>(&self, category: Category, name: &str) -> Option<&T> {
        self.get(category, name)?.downcast::<T>()
    }

    /// Capability names on `category`, sorted
    pub fn names(&self, category: Category) -> impl Iterator<Item = &str> {
        self.tables
            .get(&category)
            .into_iter()
            .flat_map(|table| table.keys().map(String::as_str))
    }

    /// Total number of capabilities across all categories
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
