//! Integration tests for modules registered at compile time

use http::{Method, Request, Response};
use modhost::{
    Application, ConfigureModules, EndpointRegistry, HostBuilder, HostSettings, InstallModules,
    Module, ModuleCatalog, ModuleLoader, ServiceCollection, discover,
};

/// Identifies this test crate's registrations
struct Marker;

#[derive(Default)]
struct LoggingModule;

impl Module for LoggingModule {
    fn configure_services(&self, services: &mut ServiceCollection) -> anyhow::Result<()> {
        services.add_singleton("Logger", "console".to_string());
        Ok(())
    }

    fn configure_application(&self, app: &mut Application) -> anyhow::Result<()> {
        app.use_middleware("request-logging");
        Ok(())
    }
}

#[derive(Default)]
struct MetricsModule;

impl Module for MetricsModule {
    fn configure_services(&self, services: &mut ServiceCollection) -> anyhow::Result<()> {
        services.add_singleton("Metrics", 0u64);
        Ok(())
    }
}

/// Shared behavior for feature modules; never instantiated itself
trait BaseFeatureModule {
    fn feature(&self) -> &'static str;
}

#[derive(Default)]
struct FeatureModule;

impl BaseFeatureModule for FeatureModule {
    fn feature(&self) -> &'static str {
        "search"
    }
}

impl Module for FeatureModule {
    fn configure_endpoints(&self, endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        let feature = self.feature();
        endpoints
            .map_get(format!("/{feature}"), move |_| Response::new(feature.to_string()))?
            .with_name(feature);
        Ok(())
    }
}

struct GreetingModule {
    greeting: String,
}

impl GreetingModule {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            greeting: "hello".to_string(),
        })
    }
}

impl Module for GreetingModule {
    fn configure_endpoints(&self, endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        let greeting = self.greeting.clone();
        endpoints.map_get("/greeting", move |_| Response::new(greeting.clone()))?;
        Ok(())
    }
}

modhost::register_module!(LoggingModule);
modhost::register_module!(MetricsModule);
modhost::register_module!(FeatureModule);
modhost::register_module!(GreetingModule, GreetingModule::from_env);
modhost::register_abstract_module!(dyn BaseFeatureModule);

fn sorted(mut names: Vec<&str>) -> Vec<&str> {
    names.sort();
    names
}

#[test]
fn test_marker_catalog_holds_this_crates_modules() {
    let catalog = ModuleCatalog::of::<Marker>();

    assert_eq!(catalog.len(), 5);
    assert_eq!(
        sorted(catalog.module_names()),
        vec!["FeatureModule", "GreetingModule", "LoggingModule", "MetricsModule"]
    );
    let base = catalog
        .entries()
        .iter()
        .find(|entry| !entry.is_concrete())
        .unwrap();
    assert_eq!(base.name, "dyn BaseFeatureModule");
}

#[test]
fn test_abstract_kind_is_never_instantiated() {
    let modules = discover(&ModuleCatalog::of::<Marker>()).unwrap();

    assert_eq!(modules.len(), 4);
    assert!(modules.iter().all(|m| m.name != "dyn BaseFeatureModule"));
}

#[test]
fn test_other_crates_are_not_scanned() {
    assert!(ModuleCatalog::of::<HostSettings>().is_empty());
    assert!(ModuleCatalog::for_crate("registry_test").len() == 5);
}

#[test]
fn test_install_from_marker_registers_every_service() {
    let builder = HostBuilder::new(HostSettings::default())
        .install_from::<Marker>()
        .unwrap();

    assert!(builder.services().contains("Logger"));
    assert!(builder.services().contains("Metrics"));
    assert_eq!(builder.services().len(), 2);
}

#[test]
fn test_full_lifecycle_from_marker() {
    let app = HostBuilder::new(HostSettings::default())
        .install_from::<Marker>()
        .unwrap()
        .build()
        .configure_from::<Marker>()
        .unwrap();

    assert_eq!(app.pipeline(), ["request-logging"]);
    assert_eq!(app.endpoints().scopes(), 1);

    let search = app.endpoints().named("search").unwrap();
    assert_eq!(search.path, "/search");
    let response = search.handle(&Request::new(String::new()));
    assert_eq!(response.body(), "search");

    let greeting = app.endpoints().find(&Method::GET, "/greeting").unwrap();
    assert_eq!(greeting.handle(&Request::new(String::new())).body(), "hello");

    let logger = app.services().require::<String>("Logger").unwrap();
    assert_eq!(logger.as_str(), "console");
}

#[test]
fn test_loader_for_marker_matches_fluent_api() {
    let loader = ModuleLoader::of::<Marker>();
    assert_eq!(loader.catalog().len(), 5);

    let mut builder = HostBuilder::new(HostSettings::default());
    loader.install(&mut builder).unwrap();
    let mut app = builder.build();
    loader.configure(&mut app).unwrap();

    assert_eq!(app.endpoints().routes().len(), 2);
}
