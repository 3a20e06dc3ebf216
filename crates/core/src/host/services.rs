//! Service registration and resolution
//!
//! A deliberately small container: services are keyed by name, and the last
//! registration for a name is the one that resolves.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::config::HostSettings;
use crate::error::{Error, Result};

type Instance = Arc<dyn Any + Send + Sync>;
type InstanceFactory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Service lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLifetime {
    /// One instance for the lifetime of the provider
    Singleton,
    /// A new instance on every resolution
    Transient,
}

#[derive(Clone)]
enum Activation {
    Instance(Instance),
    Lazy(InstanceFactory),
}

/// A registered service
#[derive(Clone)]
pub struct ServiceDescriptor {
    name: String,
    lifetime: ServiceLifetime,
    type_name: &'static str,
    activation: Activation,
}

impl ServiceDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    /// Name of the implementing type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("name", &self.name)
            .field("lifetime", &self.lifetime)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Mutable service registrations, handed to `configure_services`
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    settings: Arc<HostSettings>,
}

impl ServiceCollection {
    pub fn new(settings: Arc<HostSettings>) -> Self {
        Self {
            descriptors: Vec::new(),
            settings,
        }
    }

    /// Host settings, for modules whose registrations depend on configuration
    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Register an existing value as a singleton
    pub fn add_singleton<T>(&mut self, name: impl Into<String>, value: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.push(name.into(), ServiceLifetime::Singleton, std::any::type_name::<T>(), Activation::Instance(Arc::new(value)))
    }

    /// Register a singleton created on first resolution
    pub fn add_singleton_factory<T, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: InstanceFactory = Arc::new(move || Arc::new(factory()) as Instance);
        self.push(name.into(), ServiceLifetime::Singleton, std::any::type_name::<T>(), Activation::Lazy(factory))
    }

    /// Register a service created on every resolution
    pub fn add_transient<T, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: InstanceFactory = Arc::new(move || Arc::new(factory()) as Instance);
        self.push(name.into(), ServiceLifetime::Transient, std::any::type_name::<T>(), Activation::Lazy(factory))
    }

    /// Register a singleton unless the name is already taken.
    ///
    /// Returns whether the value was added.
    pub fn try_add_singleton<T>(&mut self, name: impl Into<String>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        let name = name.into();
        if self.contains(&name) {
            tracing::debug!("Service '{}' already registered, skipping", name);
            return false;
        }
        self.add_singleton(name, value);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.iter().any(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// Freeze the registrations into a provider
    pub fn build_provider(&self) -> ServiceProvider {
        let mut slots = HashMap::new();
        for descriptor in &self.descriptors {
            // later registrations shadow earlier ones
            slots.insert(
                descriptor.name.clone(),
                ServiceSlot {
                    descriptor: descriptor.clone(),
                    singleton: OnceLock::new(),
                },
            );
        }
        ServiceProvider {
            slots: Arc::new(slots),
            descriptors: self.descriptors.clone(),
        }
    }

    fn push(
        &mut self,
        name: String,
        lifetime: ServiceLifetime,
        type_name: &'static str,
        activation: Activation,
    ) -> &mut Self {
        tracing::debug!("Registering {:?} service '{}' ({})", lifetime, name, type_name);
        self.descriptors.push(ServiceDescriptor {
            name,
            lifetime,
            type_name,
            activation,
        });
        self
    }
}

struct ServiceSlot {
    descriptor: ServiceDescriptor,
    singleton: OnceLock<Instance>,
}

impl ServiceSlot {
    fn resolve(&self) -> Instance {
        match (&self.descriptor.activation, self.descriptor.lifetime) {
            (Activation::Instance(instance), _) => instance.clone(),
            (Activation::Lazy(factory), ServiceLifetime::Singleton) => {
                self.singleton.get_or_init(|| factory()).clone()
            }
            (Activation::Lazy(factory), ServiceLifetime::Transient) => factory(),
        }
    }
}

/// Read-only service resolution, owned by the built application
#[derive(Clone)]
pub struct ServiceProvider {
    slots: Arc<HashMap<String, ServiceSlot>>,
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceProvider {
    /// Resolve a service by name; `None` if missing or of another type
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.slots
            .get(name)
            .and_then(|slot| slot.resolve().downcast::<T>().ok())
    }

    /// Resolve a service by name, failing if it is missing or of another type
    pub fn require<T>(&self, name: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let slot = self.slots.get(name).ok_or_else(|| Error::ServiceNotFound {
            name: name.to_string(),
        })?;
        slot.resolve()
            .downcast::<T>()
            .map_err(|_| Error::ServiceTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Every registration, shadowed ones included
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("services", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn collection() -> ServiceCollection {
        ServiceCollection::new(Arc::new(HostSettings::default()))
    }

    #[test]
    fn test_singleton_resolution() {
        let mut services = collection();
        services.add_singleton("Greeting", String::from("hello"));

        let provider = services.build_provider();
        let greeting = provider.get::<String>("Greeting").unwrap();
        assert_eq!(greeting.as_str(), "hello");
        assert!(provider.get::<u32>("Greeting").is_none());
    }

    #[test]
    fn test_lazy_singleton_is_created_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = created.clone();

        let mut services = collection();
        services.add_singleton_factory("Counter", move || counter.fetch_add(1, Ordering::SeqCst));

        let provider = services.build_provider();
        assert_eq!(created.load(Ordering::SeqCst), 0);
        provider.get::<usize>("Counter").unwrap();
        provider.get::<usize>("Counter").unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transient_is_created_per_resolution() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = created.clone();

        let mut services = collection();
        services.add_transient("Request", move || counter.fetch_add(1, Ordering::SeqCst));

        let provider = services.build_provider();
        assert_eq!(*provider.get::<usize>("Request").unwrap(), 0);
        assert_eq!(*provider.get::<usize>("Request").unwrap(), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut services = collection();
        services.add_singleton("Level", 1u8).add_singleton("Level", 2u8);

        assert_eq!(services.len(), 2);
        let provider = services.build_provider();
        assert_eq!(*provider.get::<u8>("Level").unwrap(), 2);
        assert_eq!(provider.descriptors().len(), 2);
    }

    #[test]
    fn test_try_add_singleton() {
        let mut services = collection();
        assert!(services.try_add_singleton("Clock", 1u64));
        assert!(!services.try_add_singleton("Clock", 2u64));

        let provider = services.build_provider();
        assert_eq!(*provider.get::<u64>("Clock").unwrap(), 1);
    }

    #[test]
    fn test_require_errors() {
        let mut services = collection();
        services.add_singleton("Port", 8080u16);
        let provider = services.build_provider();

        assert!(matches!(
            provider.require::<u16>("Missing"),
            Err(Error::ServiceNotFound { .. })
        ));
        assert!(matches!(
            provider.require::<String>("Port"),
            Err(Error::ServiceTypeMismatch { .. })
        ));
        assert_eq!(*provider.require::<u16>("Port").unwrap(), 8080);
    }

    #[test]
    fn test_descriptor_metadata() {
        let mut services = collection();
        services.add_transient("Id", || 7u32);

        let descriptor = &services.descriptors()[0];
        assert_eq!(descriptor.name(), "Id");
        assert_eq!(descriptor.lifetime(), ServiceLifetime::Transient);
        assert_eq!(descriptor.type_name(), "u32");
        assert_eq!(services.names(), vec!["Id"]);
    }
}
