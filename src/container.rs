//! Dependency container
//!
//! Maps explicit service identifiers to factories and lazily memoizes at most
//! one instance per identifier. Nothing here is global: the application entry
//! point builds one [`Container`] and hands it to whatever needs it.
//!
//! ```
//! use crypto_list_sdk::container::{Container, ServiceKey};
//! use std::sync::Arc;
//!
//! const GREETING: ServiceKey<Arc<String>> = ServiceKey::new("greeting");
//!
//! let container = Container::new();
//! container.register(GREETING, |_| Arc::new("hello".to_string()));
//!
//! let first = container.resolve(GREETING).unwrap();
//! let second = container.resolve(GREETING).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Factory = Arc<dyn Fn(&Container) -> Box<dyn Any + Send + Sync> + Send + Sync>;
type Instance = Arc<dyn Any + Send + Sync>;

/// Identifier for one abstract service contract
///
/// The name is the identity: two keys with the same name address the same
/// registration. `T` is the handle consumers get back, usually an
/// `Arc<dyn Trait>`. Use exactly one name per contract.
pub struct ServiceKey<T> {
    name: &'static str,
    _contract: PhantomData<fn() -> T>,
}

impl<T> ServiceKey<T> {
    /// Creates a key for the given service name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _contract: PhantomData,
        }
    }

    /// Returns the service name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ServiceKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ServiceKey<T> {}

impl<T> fmt::Debug for ServiceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceKey").field(&self.name).finish()
    }
}

#[derive(Default)]
struct Registry {
    factories: HashMap<&'static str, Factory>,
    instances: HashMap<&'static str, Instance>,
}

/// Thread-safe lazy service locator
///
/// Resolution never fails loudly: an unregistered service or a key whose
/// contract type differs from what the factory builds both yield `None`.
/// Callers that cannot run without a service turn that into an error.
///
/// Factories run outside the lock, so a factory may resolve other services
/// from the same container. When two threads resolve the same service for
/// the first time concurrently, both factories may run; whichever stores its
/// instance first wins and the other instance is dropped.
#[derive(Default)]
pub struct Container {
    registry: Mutex<Registry>,
}

impl Container {
    /// Creates an empty container
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Map access never leaves the registry half-written.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers (or replaces) the factory for a service
    ///
    /// The factory is not invoked here. Replacing a factory does not touch an
    /// instance that has already been resolved.
    pub fn register<T, F>(&self, key: ServiceKey<T>, factory: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |container: &Container| {
            Box::new(factory(container)) as Box<dyn Any + Send + Sync>
        });

        let replaced = self.lock().factories.insert(key.name(), factory).is_some();
        tracing::debug!(service = key.name(), replaced, "Registered service factory");
    }

    /// Resolves a service, constructing it on first use
    ///
    /// # Returns
    /// The memoized instance, or `None` if nothing is registered under the
    /// key's name or the registered factory builds a different type.
    pub fn resolve<T>(&self, key: ServiceKey<T>) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let factory = {
            let registry = self.lock();
            if let Some(existing) = registry.instances.get(key.name()) {
                return downcast(key, existing);
            }

            match registry.factories.get(key.name()) {
                Some(factory) => factory.clone(),
                None => {
                    tracing::debug!(service = key.name(), "Service is not registered");
                    return None;
                }
            }
        };

        let created: Instance = Arc::from(factory(self));
        if !created.is::<T>() {
            tracing::warn!(
                service = key.name(),
                expected = std::any::type_name::<T>(),
                "Factory produced an instance of a different type"
            );
            return None;
        }

        let stored = {
            let mut registry = self.lock();
            match registry.instances.get(key.name()) {
                Some(existing) => {
                    tracing::debug!(
                        service = key.name(),
                        "Service resolved concurrently, discarding duplicate instance"
                    );
                    existing.clone()
                }
                None => {
                    registry.instances.insert(key.name(), created.clone());
                    tracing::debug!(service = key.name(), "Constructed service instance");
                    created
                }
            }
        };

        downcast(key, &stored)
    }

    /// Returns true if a factory is registered under `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.lock().factories.contains_key(name)
    }

    /// Returns true if an instance has been memoized under `name`
    pub fn is_resolved(&self, name: &str) -> bool {
        self.lock().instances.contains_key(name)
    }

    /// Names of all registered services, sorted
    pub fn registered_services(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.lock().factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered factories
    pub fn len(&self) -> usize {
        self.lock().factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        let mut resolved: Vec<_> = registry.instances.keys().copied().collect();
        resolved.sort_unstable();
        let mut registered: Vec<_> = registry.factories.keys().copied().collect();
        registered.sort_unstable();

        f.debug_struct("Container")
            .field("registered", &registered)
            .field("resolved", &resolved)
            .finish()
    }
}

fn downcast<T>(key: ServiceKey<T>, instance: &Instance) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    let value = instance.downcast_ref::<T>().cloned();
    if value.is_none() {
        tracing::warn!(
            service = key.name(),
            expected = std::any::type_name::<T>(),
            "Resolved instance does not match the requested contract"
        );
    }
    value
}
