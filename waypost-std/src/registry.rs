//! Controller registry: the factory-based [`Injector`].
//!
//! Controllers are registered under an identifier together with a factory.
//! Explicit constructor parameters ("overrides") can be defined per
//! identifier and are handed to the factory on every construction.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut registry = ControllerRegistry::new();
//! registry
//!     .register("Users", |params: &Overrides| -> Result<_, RegistryError> {
//!         Ok(UserController::new(params.require::<Pool>("Users", "pool")?.clone()))
//!     })
//!     .define("Users", "pool", pool);
//!
//! let controller = registry.make("Users")?;
//! ```

use std::{any::Any, collections::HashMap, fmt, sync::Arc};
use thiserror::Error;
use waypost_core::{BoxError, Controller, DynController, Injector};

type Factory = Box<dyn Fn(&Overrides) -> Result<Arc<dyn DynController>, BoxError> + Send + Sync>;

/// Errors raised by the registry and by factories reading [`Overrides`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing is registered under the identifier.
    #[error("no controller registered as `{0}`")]
    UnknownController(String),

    /// A required constructor parameter was not defined.
    #[error("`{controller}` requires parameter `{name}`, which is not defined")]
    MissingParameter {
        /// The controller being constructed.
        controller: String,
        /// The parameter name.
        name: String,
    },

    /// A parameter was defined with a different type.
    #[error("parameter `{name}` of `{controller}` is not a `{expected}`")]
    ParameterType {
        /// The controller being constructed.
        controller: String,
        /// The parameter name.
        name: String,
        /// The type the factory asked for.
        expected: &'static str,
    },
}

/// Explicit, named constructor parameters for one controller.
#[derive(Clone, Default)]
pub struct Overrides {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Overrides {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` as `value`, replacing any earlier definition.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.values.insert(name.into(), Arc::new(value));
    }

    /// Get `name` as a `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.values
            .get(name)
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Get `name` as a `T`, reporting why it is unavailable.
    pub fn require<T: Any + Send + Sync>(
        &self,
        controller: &str,
        name: &str,
    ) -> Result<&T, RegistryError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| RegistryError::MissingParameter {
                controller: controller.to_owned(),
                name: name.to_owned(),
            })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| RegistryError::ParameterType {
                controller: controller.to_owned(),
                name: name.to_owned(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// A registry of controller factories.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, Factory>,
    overrides: HashMap<String, Overrides>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for controller `id`.
    ///
    /// Registering the same identifier again replaces the factory.
    pub fn register<C, F, E>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        C: Controller,
        F: Fn(&Overrides) -> Result<C, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let factory: Factory = Box::new(move |overrides: &Overrides| {
            factory(overrides)
                .map(|controller| Arc::new(controller) as Arc<dyn DynController>)
                .map_err(Into::<BoxError>::into)
        });
        self.factories.insert(id.into(), factory);
        self
    }

    /// Register a controller constructed through [`Default`].
    pub fn register_default<C: Controller + Default>(&mut self, id: impl Into<String>) -> &mut Self {
        self.register(id, |_: &Overrides| Ok::<_, RegistryError>(C::default()))
    }

    /// Define constructor parameter `name` for controller `id`.
    pub fn define<T: Any + Send + Sync>(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: T,
    ) -> &mut Self {
        self.overrides
            .entry(id.into())
            .or_default()
            .insert(name, value);
        self
    }

    /// Whether a factory is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Get the number of registered controllers.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Injector for ControllerRegistry {
    fn make(&self, id: &str) -> Result<Arc<dyn DynController>, BoxError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| RegistryError::UnknownController(id.to_owned()))?;

        let empty = Overrides::default();
        let overrides = self.overrides.get(id).unwrap_or(&empty);
        factory(overrides)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.factories.keys().collect::<Vec<_>>())
            .field("overrides", &self.overrides)
            .finish()
    }
}

/// Registration entry for a controller in the global registry.
///
/// This struct is submitted to `inventory` for automatic collection:
///
/// ```rust,ignore
/// inventory::submit! {
///     ControllerRegistration::new("Welcome", construct_default::<WelcomeController>)
/// }
///
/// let registry = ControllerRegistry::collected();
/// ```
#[cfg(feature = "inventory")]
pub struct ControllerRegistration {
    /// The identifier descriptors refer to.
    pub id: &'static str,
    /// Constructs the controller.
    pub make: fn(&Overrides) -> Result<Arc<dyn DynController>, BoxError>,
}

#[cfg(feature = "inventory")]
impl ControllerRegistration {
    /// Create a registration entry.
    pub const fn new(
        id: &'static str,
        make: fn(&Overrides) -> Result<Arc<dyn DynController>, BoxError>,
    ) -> Self {
        Self { id, make }
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(ControllerRegistration);

/// Factory for controllers constructed through [`Default`], usable in
/// [`ControllerRegistration`].
#[cfg(feature = "inventory")]
pub fn construct_default<C: Controller + Default>(
    _: &Overrides,
) -> Result<Arc<dyn DynController>, BoxError> {
    Ok(Arc::new(C::default()))
}

#[cfg(feature = "inventory")]
impl ControllerRegistry {
    /// Create a registry from every submitted [`ControllerRegistration`].
    pub fn collected() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<ControllerRegistration> {
            registry
                .factories
                .insert(registration.id.to_owned(), Box::new(registration.make));
        }
        registry
    }
}
