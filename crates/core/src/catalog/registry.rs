//! Compile-time module registry
//!
//! Modules are submitted with [`register_module!`](crate::register_module) or
//! [`register_abstract_module!`](crate::register_abstract_module) and collected
//! through `inventory`. Each registration remembers the `module_path!()` it was
//! declared at, which is how catalogs are narrowed down to a single crate.

use super::{CatalogEntry, EntryKind, ModuleFactory};
use crate::module::Module;

type ConstructFn = fn() -> anyhow::Result<Box<dyn Module>>;

/// How a registered module type is instantiated
#[derive(Debug, Clone, Copy)]
pub enum RegistrationKind {
    Concrete(ConstructFn),
    Abstract,
}

/// A module type submitted to the compile-time registry
#[derive(Debug)]
pub struct ModuleRegistration {
    name: &'static str,
    module_path: &'static str,
    kind: RegistrationKind,
}

impl ModuleRegistration {
    pub const fn concrete(name: &'static str, module_path: &'static str, construct: ConstructFn) -> Self {
        Self {
            name,
            module_path,
            kind: RegistrationKind::Concrete(construct),
        }
    }

    pub const fn abstract_kind(name: &'static str, module_path: &'static str) -> Self {
        Self {
            name,
            module_path,
            kind: RegistrationKind::Abstract,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    /// Crate the registration was declared in
    pub fn crate_name(&self) -> &'static str {
        crate_of(self.module_path)
    }

    pub(crate) fn to_entry(&self) -> CatalogEntry {
        let kind = match self.kind {
            RegistrationKind::Concrete(construct) => EntryKind::Concrete(ModuleFactory::new(construct)),
            RegistrationKind::Abstract => EntryKind::Abstract,
        };
        CatalogEntry {
            name: self.name.to_string(),
            kind,
        }
    }
}

inventory::collect!(ModuleRegistration);

pub(crate) fn registrations() -> impl Iterator<Item = &'static ModuleRegistration> {
    inventory::iter::<ModuleRegistration>.into_iter()
}

/// Crate name of a type or module path.
///
/// Takes the first path segment, ignoring reference and `dyn` prefixes.
pub fn crate_of(path: &str) -> &str {
    let path = path.trim_start_matches(['&', '*']);
    let path = path.strip_prefix("mut ").unwrap_or(path);
    let path = path.strip_prefix("const ").unwrap_or(path);
    let path = path.strip_prefix("dyn ").unwrap_or(path);
    path.split("::").next().unwrap_or(path)
}

/// Register a module type in the compile-time registry.
///
/// `register_module!(MyModule)` constructs through `Default`.
/// `register_module!(MyModule, MyModule::try_new)` uses a fallible
/// constructor returning `Result<MyModule, E>`.
#[macro_export]
macro_rules! register_module {
    ($module:ty) => {
        const _: () = {
            fn construct() -> $crate::__private::anyhow::Result<::std::boxed::Box<dyn $crate::Module>> {
                let module: $module = ::core::default::Default::default();
                ::core::result::Result::Ok(::std::boxed::Box::new(module))
            }

            $crate::__private::inventory::submit! {
                $crate::catalog::ModuleRegistration::concrete(
                    ::core::stringify!($module),
                    ::core::module_path!(),
                    construct,
                )
            }
        };
    };
    ($module:ty, $constructor:expr) => {
        const _: () = {
            fn construct() -> $crate::__private::anyhow::Result<::std::boxed::Box<dyn $crate::Module>> {
                let module: $module = ($constructor)()?;
                ::core::result::Result::Ok(::std::boxed::Box::new(module))
            }

            $crate::__private::inventory::submit! {
                $crate::catalog::ModuleRegistration::concrete(
                    ::core::stringify!($module),
                    ::core::module_path!(),
                    construct,
                )
            }
        };
    };
}

/// Declare an abstract module kind; it is listed in catalogs but never built.
#[macro_export]
macro_rules! register_abstract_module {
    ($module:ty) => {
        $crate::__private::inventory::submit! {
            $crate::catalog::ModuleRegistration::abstract_kind(
                ::core::stringify!($module),
                ::core::module_path!(),
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleCatalog;

    #[derive(Default)]
    struct RegistryProbe;
    impl Module for RegistryProbe {}

    struct BaseProbe;

    crate::register_module!(RegistryProbe);
    crate::register_abstract_module!(BaseProbe);

    #[test]
    fn test_crate_of() {
        assert_eq!(crate_of("modhost_core::catalog::Thing"), "modhost_core");
        assert_eq!(crate_of("&my_app::Marker"), "my_app");
        assert_eq!(crate_of("dyn my_app::Trait"), "my_app");
        assert_eq!(crate_of("u32"), "u32");
    }

    #[test]
    fn test_registrations_record_their_crate() {
        let probe = registrations()
            .find(|registration| registration.name() == "RegistryProbe")
            .unwrap();

        assert_eq!(probe.crate_name(), "modhost_core");
        assert!(probe.module_path().ends_with("catalog::registry::tests"));
        assert!(matches!(probe.kind(), RegistrationKind::Concrete(_)));
    }

    #[test]
    fn test_marker_catalog_contains_crate_registrations() {
        let catalog = ModuleCatalog::of::<RegistryProbe>();

        assert!(catalog.module_names().contains(&"RegistryProbe"));
        let base = catalog
            .entries()
            .iter()
            .find(|entry| entry.name == "BaseProbe")
            .unwrap();
        assert!(!base.is_concrete());
    }
}
