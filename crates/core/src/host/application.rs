use std::sync::Arc;

use serde::Serialize;

use crate::config::HostSettings;
use crate::host::{EndpointRegistry, RouteSummary, ServiceLifetime, ServiceProvider};

/// A built host application: service provider, middleware pipeline and routes
#[derive(Debug, Clone)]
pub struct Application {
    settings: Arc<HostSettings>,
    services: ServiceProvider,
    pipeline: Vec<String>,
    endpoints: EndpointRegistry,
}

impl Application {
    pub(crate) fn new(settings: Arc<HostSettings>, services: ServiceProvider) -> Self {
        Self {
            settings,
            services,
            pipeline: Vec::new(),
            endpoints: EndpointRegistry::new(),
        }
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn services(&self) -> &ServiceProvider {
        &self.services
    }

    /// Append a middleware to the pipeline
    pub fn use_middleware(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!("Adding middleware '{}'", name);
        self.pipeline.push(name);
        self
    }

    /// Middleware names, in the order they were added
    pub fn pipeline(&self) -> &[String] {
        &self.pipeline
    }

    /// Run `configure` against the route table inside a new registration scope
    pub fn use_endpoints<F, R>(&mut self, configure: F) -> R
    where
        F: FnOnce(&mut EndpointRegistry) -> R,
    {
        let scope = self.endpoints.begin_scope();
        tracing::debug!("Opened endpoint scope {}", scope);
        configure(&mut self.endpoints)
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// Summary of what the host ended up with
    pub fn report(&self) -> HostReport {
        HostReport {
            application_name: self.settings.application_name.clone(),
            environment: self.settings.environment.clone(),
            services: self
                .services
                .descriptors()
                .iter()
                .map(|descriptor| ServiceSummary {
                    name: descriptor.name().to_string(),
                    lifetime: descriptor.lifetime(),
                })
                .collect(),
            pipeline: self.pipeline.clone(),
            routes: self.endpoints.routes().iter().map(RouteSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub lifetime: ServiceLifetime,
}

/// Serializable summary of a configured application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
    pub application_name: String,
    pub environment: String,
    pub services: Vec<ServiceSummary>,
    pub pipeline: Vec<String>,
    pub routes: Vec<RouteSummary>,
}
