//! Module discovery and lifecycle dispatch
//!
//! Every stage runs its own discovery pass: instances are created, receive a
//! single hook call each, and are dropped when the pass ends. Nothing is kept
//! between `install` and `configure`.

use tracing::{debug, info, warn};

use crate::catalog::{EntryKind, ModuleCatalog};
use crate::error::{Error, Result};
use crate::host::{Application, HostBuilder};
use crate::module::Module;
use crate::stage::LifecycleStage;

/// A module instance produced by discovery
pub struct LoadedModule {
    pub name: String,
    pub module: Box<dyn Module>,
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule").field("name", &self.name).finish()
    }
}

/// Instantiate every concrete entry of a catalog.
///
/// Abstract entries are skipped. The first constructor failure aborts
/// discovery.
pub fn discover(catalog: &ModuleCatalog) -> Result<Vec<LoadedModule>> {
    let mut modules = Vec::with_capacity(catalog.len());

    for entry in catalog.entries() {
        let factory = match &entry.kind {
            EntryKind::Concrete(factory) => factory,
            EntryKind::Abstract => {
                debug!("Skipping abstract module '{}'", entry.name);
                continue;
            }
        };

        let module = factory.construct().map_err(|source| {
            warn!("Failed to construct module '{}': {}", entry.name, source);
            Error::Construction {
                module: entry.name.clone(),
                source,
            }
        })?;
        modules.push(LoadedModule {
            name: entry.name.clone(),
            module,
        });
    }

    debug!("Discovered {} modules", modules.len());
    Ok(modules)
}

/// Runs the module lifecycle for one catalog
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    catalog: ModuleCatalog,
}

impl ModuleLoader {
    pub fn new(catalog: ModuleCatalog) -> Self {
        Self { catalog }
    }

    /// Loader for the modules registered in the crate that defines `M`
    pub fn of<M: ?Sized + 'static>() -> Self {
        Self::new(ModuleCatalog::of::<M>())
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Call `configure_services` on a fresh instance of every module
    pub fn install(&self, builder: &mut HostBuilder) -> Result<()> {
        let services = builder.services_mut();
        dispatch(&self.catalog, LifecycleStage::ConfigureServices, |module| {
            module.configure_services(services)
        })
    }

    /// Call `configure_application` on every module, then
    /// `configure_endpoints` on every module inside one endpoint scope
    pub fn configure(&self, app: &mut Application) -> Result<()> {
        dispatch(&self.catalog, LifecycleStage::ConfigureApplication, |module| {
            module.configure_application(app)
        })?;

        app.use_endpoints(|endpoints| {
            dispatch(&self.catalog, LifecycleStage::ConfigureEndpoints, |module| {
                module.configure_endpoints(endpoints)
            })
        })
    }
}

fn dispatch<F>(catalog: &ModuleCatalog, stage: LifecycleStage, mut hook: F) -> Result<()>
where
    F: FnMut(&dyn Module) -> anyhow::Result<()>,
{
    let modules = discover(catalog)?;
    info!("Running {} for {} modules", stage, modules.len());

    for LoadedModule { name, module } in modules {
        debug!("{} -> {}", stage, name);
        if let Err(source) = hook(module.as_ref()) {
            warn!("Module '{}' failed during {}: {}", name, stage, source);
            return Err(Error::Hook {
                module: name,
                stage,
                source,
            });
        }
    }
    Ok(())
}

/// Fluent module installation on a host builder
pub trait InstallModules: Sized {
    /// Install the modules of an explicit catalog
    fn install(self, catalog: &ModuleCatalog) -> Result<Self>;

    /// Install the modules registered in the crate that defines `M`
    fn install_from<M: ?Sized + 'static>(self) -> Result<Self> {
        self.install(&ModuleCatalog::of::<M>())
    }
}

impl InstallModules for HostBuilder {
    fn install(mut self, catalog: &ModuleCatalog) -> Result<Self> {
        ModuleLoader::new(catalog.clone()).install(&mut self)?;
        Ok(self)
    }
}

/// Fluent module configuration on a built application
pub trait ConfigureModules: Sized {
    /// Configure the modules of an explicit catalog
    fn configure(self, catalog: &ModuleCatalog) -> Result<Self>;

    /// Configure the modules registered in the crate that defines `M`
    fn configure_from<M: ?Sized + 'static>(self) -> Result<Self> {
        self.configure(&ModuleCatalog::of::<M>())
    }
}

impl ConfigureModules for Application {
    fn configure(mut self, catalog: &ModuleCatalog) -> Result<Self> {
        ModuleLoader::new(catalog.clone()).configure(&mut self)?;
        Ok(self)
    }
}
