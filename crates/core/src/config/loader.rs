//! Settings loader
//!
//! Reads `modhost.json` from the content root, overlays
//! `modhost.{environment}.json`, then applies `MODHOST_*` environment
//! variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::merge::merge_values;
use super::settings::{HostSettings, PRODUCTION};
use crate::error::{Error, Result};

pub const SETTINGS_FILE: &str = "modhost.json";
pub const ENVIRONMENT_VAR: &str = "MODHOST_ENVIRONMENT";
pub const APPLICATION_NAME_VAR: &str = "MODHOST_APPLICATION_NAME";

const ENV_PREFIX: &str = "MODHOST_";

pub struct SettingsLoader {
    content_root: PathBuf,
    env: HashMap<String, String>,
}

impl SettingsLoader {
    /// Loader for a content root, seeded with the process' `MODHOST_*` variables
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        let env = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        Self {
            content_root: content_root.into(),
            env,
        }
    }

    /// Forget the variables captured from the process environment
    pub fn clear_env(mut self) -> Self {
        self.env.clear();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn load(&self) -> Result<HostSettings> {
        let mut values = match Self::read_document(&self.content_root.join(SETTINGS_FILE))? {
            Some(document) => document,
            None => {
                debug!("No {} in {:?}", SETTINGS_FILE, self.content_root);
                Value::Object(Default::default())
            }
        };

        let environment = self
            .env
            .get(ENVIRONMENT_VAR)
            .cloned()
            .or_else(|| string_at(&values, "environment"))
            .unwrap_or_else(|| PRODUCTION.to_string());

        if let Some(overlay) = self.read_environment_document(&environment)? {
            merge_values(&mut values, overlay);
        }

        let application_name = self
            .env
            .get(APPLICATION_NAME_VAR)
            .cloned()
            .or_else(|| string_at(&values, "application_name"))
            .unwrap_or_else(|| self.default_application_name());

        debug!(
            "Loaded settings for '{}' in environment '{}'",
            application_name, environment
        );
        Ok(HostSettings {
            application_name,
            environment,
            content_root: self.content_root.clone(),
            values,
        })
    }

    fn read_environment_document(&self, environment: &str) -> Result<Option<Value>> {
        if environment.is_empty()
            || environment.contains(['/', '\\'])
            || environment.contains("..")
        {
            return Err(Error::ConfigError(format!(
                "Invalid environment name '{environment}'"
            )));
        }

        let mut candidates = vec![format!("modhost.{}.json", environment)];
        let lowercase = environment.to_lowercase();
        if lowercase != environment {
            candidates.push(format!("modhost.{}.json", lowercase));
        }

        for candidate in candidates {
            if let Some(document) = Self::read_document(&self.content_root.join(candidate))? {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    fn read_document(path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        debug!("Reading settings from {:?}", path);
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Failed to read settings file {:?}: {}", path, e);
                return Err(e.into());
            }
        };

        let document: Value = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        if !document.is_object() {
            return Err(Error::ConfigError(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }
        Ok(Some(document))
    }

    fn default_application_name(&self) -> String {
        self.content_root
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| HostSettings::default().application_name)
    }
}

fn string_at(values: &Value, key: &str) -> Option<String> {
    values.get(key).and_then(Value::as_str).map(str::to_string)
}
