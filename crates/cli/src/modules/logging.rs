use modhost_core::{Application, Module, ServiceCollection};

/// Logger handed out by the service provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    pub level: String,
}

/// Registers the shared logger and request logging middleware
#[derive(Debug, Default)]
pub struct LoggingModule;

impl Module for LoggingModule {
    fn configure_services(&self, services: &mut ServiceCollection) -> anyhow::Result<()> {
        let level = services
            .settings()
            .get::<String>("logging.level")
            .unwrap_or_else(|| "info".to_string());
        services.add_singleton("Logger", Logger { level });
        Ok(())
    }

    fn configure_application(&self, app: &mut Application) -> anyhow::Result<()> {
        app.use_middleware("request-logging");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modhost_core::{HostBuilder, HostSettings};
    use serde_json::json;

    #[test]
    fn test_level_comes_from_settings() {
        let settings = HostSettings {
            values: json!({ "logging": { "level": "debug" } }),
            ..HostSettings::default()
        };
        let mut builder = HostBuilder::new(settings);
        LoggingModule.configure_services(builder.services_mut()).unwrap();

        let app = builder.build();
        let logger = app.services().require::<Logger>("Logger").unwrap();
        assert_eq!(logger.level, "debug");
    }
}
