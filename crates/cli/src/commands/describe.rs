use anyhow::{Context, Result};
use std::{env, path::Path, path::PathBuf};
use tracing::{debug, info};

use modhost_core::{ConfigureModules, HostBuilder, HostReport, InstallModules};

use crate::display::print_report;
use crate::modules::catalog;

pub fn describe_command(cwd: Option<&str>, json: bool) -> Result<()> {
    let content_root = match cwd {
        Some(cwd) => PathBuf::from(cwd),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !content_root.is_dir() {
        return Err(anyhow::anyhow!(
            "Content root not found: {}",
            content_root.display()
        ));
    }

    let report = describe_host(&content_root)?;

    if json {
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize host report")?;
        println!("{output}");
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Assemble a host from the built-in catalog and report what it contains
pub fn describe_host(content_root: &Path) -> Result<HostReport> {
    debug!("Describing host rooted at {:?}", content_root);
    let catalog = catalog();

    let builder = HostBuilder::from_settings_dir(content_root)
        .with_context(|| format!("Failed to load settings from {}", content_root.display()))?;
    let app = builder
        .install(&catalog)
        .context("Failed to install modules")?
        .build()
        .configure(&catalog)
        .context("Failed to configure modules")?;

    info!(
        "Host '{}' ready with {} routes",
        app.settings().application_name,
        app.endpoints().routes().len()
    );
    Ok(app.report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modhost_core::ServiceLifetime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_describe_host_runs_every_stage() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("modhost.json"),
            r#"{ "application_name": "shop", "metrics": { "enabled": false } }"#,
        )
        .unwrap();

        let report = describe_host(temp_dir.path()).unwrap();

        assert_eq!(report.application_name, "shop");
        assert_eq!(report.services.len(), 1);
        assert_eq!(report.services[0].name, "Logger");
        assert_eq!(report.services[0].lifetime, ServiceLifetime::Singleton);
        assert_eq!(report.pipeline, vec!["request-logging"]);
        assert_eq!(report.routes.len(), 2);
    }
}
