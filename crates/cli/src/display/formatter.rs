use modhost_core::{EntryKind, HostReport, ModuleCatalog, ServiceLifetime};

pub fn format_catalog(catalog: &ModuleCatalog) -> String {
    let mut out = format!("📦 Modules ({})\n", catalog.len());
    for entry in catalog.entries() {
        let kind = match entry.kind {
            EntryKind::Concrete(_) => "concrete",
            EntryKind::Abstract => "abstract",
        };
        out.push_str(&format!("   • {} ({})\n", entry.name, kind));
    }
    out
}

pub fn format_report(report: &HostReport) -> String {
    let mut out = format!(
        "🏠 Host: {} [{}]\n{}\n",
        report.application_name,
        report.environment,
        "=".repeat(60)
    );

    out.push_str(&format!("\n🔧 Services ({}):\n", report.services.len()));
    for service in &report.services {
        let lifetime = match service.lifetime {
            ServiceLifetime::Singleton => "singleton",
            ServiceLifetime::Transient => "transient",
        };
        out.push_str(&format!("   • {} ({})\n", service.name, lifetime));
    }

    out.push_str(&format!("\n🧱 Pipeline ({}):\n", report.pipeline.len()));
    for (index, middleware) in report.pipeline.iter().enumerate() {
        out.push_str(&format!("   {}. {}\n", index + 1, middleware));
    }

    out.push_str(&format!("\n🌐 Routes ({}):\n", report.routes.len()));
    for route in &report.routes {
        match &route.name {
            Some(name) => out.push_str(&format!("   {} {} ({})\n", route.method, route.path, name)),
            None => out.push_str(&format!("   {} {}\n", route.method, route.path)),
        }
    }
    out
}

pub fn print_catalog(catalog: &ModuleCatalog) {
    print!("{}", format_catalog(catalog));
}

pub fn print_report(report: &HostReport) {
    print!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use modhost_core::RouteSummary;
    use modhost_core::host::ServiceSummary;

    #[test]
    fn test_report_sections() {
        let report = HostReport {
            application_name: "shop".to_string(),
            environment: "Staging".to_string(),
            services: vec![ServiceSummary {
                name: "Logger".to_string(),
                lifetime: ServiceLifetime::Singleton,
            }],
            pipeline: vec!["request-logging".to_string()],
            routes: vec![RouteSummary {
                method: "GET".to_string(),
                path: "/health".to_string(),
                name: Some("health".to_string()),
            }],
        };

        let text = format_report(&report);
        assert!(text.starts_with("🏠 Host: shop [Staging]"));
        assert!(text.contains("• Logger (singleton)"));
        assert!(text.contains("1. request-logging"));
        assert!(text.contains("GET /health (health)"));
    }

    #[test]
    fn test_catalog_lists_kinds() {
        let catalog = ModuleCatalog::new()
            .with_module::<crate::modules::HealthModule>("HealthModule")
            .with_abstract("BaseFeatureModule");

        let text = format_catalog(&catalog);
        assert!(text.contains("Modules (2)"));
        assert!(text.contains("HealthModule (concrete)"));
        assert!(text.contains("BaseFeatureModule (abstract)"));
    }
}
