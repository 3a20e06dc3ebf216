//! Host settings for modhost

pub mod loader;
pub mod merge;
mod settings;

// Re-export main types
pub use loader::{APPLICATION_NAME_VAR, ENVIRONMENT_VAR, SETTINGS_FILE, SettingsLoader};
pub use merge::merge_values;
pub use settings::{DEVELOPMENT, HostSettings, PRODUCTION, STAGING};
