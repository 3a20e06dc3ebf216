//! modhost - modular startup configuration for web hosts
//!
//! This crate provides functionality to:
//! - Declare modules that hook into the three startup stages of a host
//! - Discover every concrete module declared by a code unit
//! - Dispatch services, application and endpoint configuration to each module
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod module;
pub mod stage;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use module::{Module, ModuleHooks};
pub use stage::LifecycleStage;

// Re-export main API components
pub use catalog::{CatalogEntry, EntryKind, ModuleCatalog, ModuleFactory};
pub use config::{HostSettings, SettingsLoader};
pub use host::{
    Application, EndpointRegistry, HostBuilder, HostReport, Route, RouteSummary,
    ServiceCollection, ServiceLifetime, ServiceProvider,
};
pub use loader::{ConfigureModules, InstallModules, LoadedModule, ModuleLoader, discover};

#[doc(hidden)]
pub mod __private {
    pub use anyhow;
    pub use inventory;
}
