//! Module catalogs
//!
//! A catalog is the set of module types one code unit declares. Catalogs
//! come either from an explicit registration list built by the host or from
//! the compile-time registry filled by [`register_module!`](crate::register_module).

mod registry;

pub use registry::{ModuleRegistration, RegistrationKind, crate_of};

use std::sync::Arc;

use crate::module::Module;

type FactoryFn = dyn Fn() -> anyhow::Result<Box<dyn Module>> + Send + Sync;

/// Parameterless constructor for a module type
#[derive(Clone)]
pub struct ModuleFactory(Arc<FactoryFn>);

impl ModuleFactory {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<Box<dyn Module>> + Send + Sync + 'static,
    {
        Self(Arc::new(factory))
    }

    /// Factory backed by the type's `Default` implementation
    pub fn from_default<T>() -> Self
    where
        T: Module + Default + 'static,
    {
        Self::new(|| Ok(Box::new(T::default()) as Box<dyn Module>))
    }

    pub fn construct(&self) -> anyhow::Result<Box<dyn Module>> {
        (self.0)()
    }
}

impl std::fmt::Debug for ModuleFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModuleFactory")
    }
}

/// Kind of a catalog entry
#[derive(Debug, Clone)]
pub enum EntryKind {
    /// Instantiable module type
    Concrete(ModuleFactory),
    /// Base kind that is declared but never instantiated
    Abstract,
}

/// A single module type declared in a catalog
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl CatalogEntry {
    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, EntryKind::Concrete(_))
    }
}

/// Set of module types declared by one code unit.
///
/// Entry order is whatever the source yields: insertion order for explicit
/// catalogs, registry order for compile-time ones. Callers must not treat it
/// as meaningful.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    entries: Vec<CatalogEntry>,
}

impl ModuleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every module registered in the crate that defines `M`
    pub fn of<M: ?Sized + 'static>() -> Self {
        Self::for_crate(crate_of(std::any::type_name::<M>()))
    }

    /// Catalog of every module registered in the named crate
    pub fn for_crate(crate_name: &str) -> Self {
        let entries: Vec<CatalogEntry> = registry::registrations()
            .filter(|registration| registration.crate_name() == crate_name)
            .map(ModuleRegistration::to_entry)
            .collect();

        tracing::debug!(
            "Catalog for crate '{}' has {} entries",
            crate_name,
            entries.len()
        );
        Self { entries }
    }

    /// Add a module constructed through `Default`
    pub fn with_module<T>(self, name: impl Into<String>) -> Self
    where
        T: Module + Default + 'static,
    {
        self.with_entry(name, EntryKind::Concrete(ModuleFactory::from_default::<T>()))
    }

    /// Add a module with a fallible constructor
    pub fn with_factory<T, F>(self, name: impl Into<String>, factory: F) -> Self
    where
        T: Module + 'static,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let factory = ModuleFactory::new(move || Ok(Box::new(factory()?) as Box<dyn Module>));
        self.with_entry(name, EntryKind::Concrete(factory))
    }

    /// Declare an abstract module kind
    pub fn with_abstract(self, name: impl Into<String>) -> Self {
        self.with_entry(name, EntryKind::Abstract)
    }

    pub fn with_entry(mut self, name: impl Into<String>, kind: EntryKind) -> Self {
        self.entries.push(CatalogEntry {
            name: name.into(),
            kind,
        });
        self
    }

    /// Append every entry of another catalog
    pub fn merge(mut self, other: ModuleCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the concrete entries
    pub fn module_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.is_concrete())
            .map(|entry| entry.name.as_str())
            .collect()
    }
}
