//! modhost - modular startup configuration for web hosts
//!
//! Hosts split their startup into modules. Each module may register
//! services, configure the application pipeline and map endpoints; the
//! loader discovers the modules of a code unit and calls each hook in
//! lifecycle order.
//!
//! ```ignore
//! use modhost::{ConfigureModules, HostBuilder, InstallModules, Module, ServiceCollection};
//!
//! #[derive(Default)]
//! struct LoggingModule;
//!
//! impl Module for LoggingModule {
//!     fn configure_services(&self, services: &mut ServiceCollection) -> anyhow::Result<()> {
//!         services.add_singleton("Logger", ());
//!         Ok(())
//!     }
//! }
//!
//! modhost::register_module!(LoggingModule);
//!
//! let app = HostBuilder::from_settings_dir(".".as_ref())?
//!     .install_from::<LoggingModule>()?
//!     .build()
//!     .configure_from::<LoggingModule>()?;
//! ```

pub use modhost_core::*;

pub use http;
