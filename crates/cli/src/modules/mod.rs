//! Built-in demo modules

pub mod health;
pub mod logging;
pub mod metrics;

pub use health::HealthModule;
pub use logging::{Logger, LoggingModule};
pub use metrics::{Metrics, MetricsModule};

use modhost_core::ModuleCatalog;

/// Catalog of the modules bundled with the inspector
pub fn catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .with_module::<LoggingModule>("LoggingModule")
        .with_module::<MetricsModule>("MetricsModule")
        .with_module::<HealthModule>("HealthModule")
}
