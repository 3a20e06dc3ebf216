use http::Response;
use modhost_core::{EndpointRegistry, Module};

/// Liveness endpoint
#[derive(Debug, Default)]
pub struct HealthModule;

impl Module for HealthModule {
    fn configure_endpoints(&self, endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        endpoints
            .map_get("/health", |_| Response::new("Healthy".to_string()))?
            .with_name("health");
        Ok(())
    }
}
