use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three host lifecycle stages a module takes part in.
///
/// Stages always run in declaration order across the whole module set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    /// Service registration, before the service provider is built
    ConfigureServices,
    /// Application configuration, once the application object exists
    ConfigureApplication,
    /// Endpoint configuration, inside an endpoint-registration scope
    ConfigureEndpoints,
}

impl LifecycleStage {
    pub const ALL: [LifecycleStage; 3] = [
        LifecycleStage::ConfigureServices,
        LifecycleStage::ConfigureApplication,
        LifecycleStage::ConfigureEndpoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::ConfigureServices => "configure_services",
            LifecycleStage::ConfigureApplication => "configure_application",
            LifecycleStage::ConfigureEndpoints => "configure_endpoints",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
