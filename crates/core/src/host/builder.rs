use std::path::Path;
use std::sync::Arc;

use crate::config::{HostSettings, SettingsLoader};
use crate::error::Result;
use crate::host::{Application, ServiceCollection};

/// Pre-build host state: settings and service registrations
#[derive(Debug, Clone, Default)]
pub struct HostBuilder {
    settings: Arc<HostSettings>,
    services: ServiceCollection,
}

impl HostBuilder {
    pub fn new(settings: HostSettings) -> Self {
        let settings = Arc::new(settings);
        Self {
            services: ServiceCollection::new(settings.clone()),
            settings,
        }
    }

    /// Create a builder with settings loaded from a content root
    pub fn from_settings_dir(content_root: &Path) -> Result<Self> {
        let settings = SettingsLoader::new(content_root).load()?;
        Ok(Self::new(settings))
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn services(&self) -> &ServiceCollection {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceCollection {
        &mut self.services
    }

    /// Freeze service registrations and create the application
    pub fn build(self) -> Application {
        tracing::info!(
            "Building application '{}' ({}) with {} services",
            self.settings.application_name,
            self.settings.environment,
            self.services.len()
        );
        let provider = self.services.build_provider();
        Application::new(self.settings, provider)
    }
}
