//! Module interface for modhost
//!
//! Defines the module trait and the closure-based hook set.

use crate::host::{Application, EndpointRegistry, ServiceCollection};

/// A self-contained unit of startup configuration.
///
/// Every hook is optional; the default implementations do nothing. Hooks run
/// in discovery order, which carries no guarantee, so a module must not rely
/// on services or middleware added by another module's hook in the same stage.
pub trait Module: Send + Sync {
    /// Register services (optional)
    /// Called before the host builds its service provider
    fn configure_services(&self, _services: &mut ServiceCollection) -> anyhow::Result<()> {
        Ok(())
    }

    /// Configure the application pipeline (optional)
    /// Called after the application is built, before any endpoint is configured
    fn configure_application(&self, _app: &mut Application) -> anyhow::Result<()> {
        Ok(())
    }

    /// Register routes (optional)
    /// Called inside the endpoint-registration scope opened by the loader
    fn configure_endpoints(&self, _endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        Ok(())
    }
}

type ServicesHook = Box<dyn Fn(&mut ServiceCollection) -> anyhow::Result<()> + Send + Sync>;
type ApplicationHook = Box<dyn Fn(&mut Application) -> anyhow::Result<()> + Send + Sync>;
type EndpointsHook = Box<dyn Fn(&mut EndpointRegistry) -> anyhow::Result<()> + Send + Sync>;

/// A module assembled from up to three callbacks.
///
/// A missing callback behaves like the trait's default no-op.
#[derive(Default)]
pub struct ModuleHooks {
    services: Option<ServicesHook>,
    application: Option<ApplicationHook>,
    endpoints: Option<EndpointsHook>,
}

impl ModuleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_services<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut ServiceCollection) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.services = Some(Box::new(hook));
        self
    }

    pub fn on_application<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Application) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.application = Some(Box::new(hook));
        self
    }

    pub fn on_endpoints<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut EndpointRegistry) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.endpoints = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for ModuleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHooks")
            .field("services", &self.services.is_some())
            .field("application", &self.application.is_some())
            .field("endpoints", &self.endpoints.is_some())
            .finish()
    }
}

impl Module for ModuleHooks {
    fn configure_services(&self, services: &mut ServiceCollection) -> anyhow::Result<()> {
        match &self.services {
            Some(hook) => hook(services),
            None => Ok(()),
        }
    }

    fn configure_application(&self, app: &mut Application) -> anyhow::Result<()> {
        match &self.application {
            Some(hook) => hook(app),
            None => Ok(()),
        }
    }

    fn configure_endpoints(&self, endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        match &self.endpoints {
            Some(hook) => hook(endpoints),
            None => Ok(()),
        }
    }
}
