use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

pub const DEVELOPMENT: &str = "Development";
pub const STAGING: &str = "Staging";
pub const PRODUCTION: &str = "Production";

/// Host settings visible to every module
#[derive(Debug, Clone, PartialEq)]
pub struct HostSettings {
    pub application_name: String,
    pub environment: String,
    /// Directory the settings files were read from
    pub content_root: PathBuf,
    /// Merged settings document
    pub values: Value,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            application_name: "modhost".to_string(),
            environment: PRODUCTION.to_string(),
            content_root: PathBuf::from("."),
            values: Value::Object(Default::default()),
        }
    }
}

impl HostSettings {
    pub fn is_environment(&self, name: &str) -> bool {
        self.environment.eq_ignore_ascii_case(name)
    }

    pub fn is_development(&self) -> bool {
        self.is_environment(DEVELOPMENT)
    }

    pub fn is_staging(&self) -> bool {
        self.is_environment(STAGING)
    }

    pub fn is_production(&self) -> bool {
        self.is_environment(PRODUCTION)
    }

    /// Raw value at a dotted path such as `logging.level`
    pub fn section(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return Some(&self.values);
        }
        let pointer: String = key
            .split('.')
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();
        self.values.pointer(&pointer)
    }

    /// Typed value at a dotted path; `None` when missing or of another shape
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.section(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Typed value at a dotted path, failing when missing or malformed
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .section(key)
            .ok_or_else(|| Error::ConfigError(format!("Missing setting '{key}'")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| Error::ConfigError(format!("Invalid setting '{key}': {e}")))
    }
}
