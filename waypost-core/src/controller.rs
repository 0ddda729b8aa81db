//! # Controllers
//!
//! A controller is a value constructed per request by an [`Injector`] and
//! exposing named actions. Actions are looked up by name at resolution time,
//! which is what a `"<ControllerId>#<action>"` descriptor refers to.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Controller`] is implemented by concrete types and returns plain function
//! pointers. [`DynController`] is its object-safe counterpart, implemented for
//! every `Controller` automatically, and is what injectors hand out.
//!
//! # Example
//!
//! ```rust,ignore
//! struct Users;
//!
//! impl Users {
//!     fn show(&self, request: &Request) -> http::Response<Bytes> { ... }
//! }
//!
//! controller_actions!(Users { "show" => show });
//! ```

use crate::{
    error::BoxError,
    handler::BoxHandler,
    request::Request,
    response::Outcome,
};
use std::{any::Any, fmt, sync::Arc};

/// An action on controller `C`.
pub type Action<C> = fn(&C, &Request) -> Outcome;

/// A type exposing routable actions by name.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a controller",
    label = "missing `Controller` implementation",
    note = "Implement `Controller::action`, or use the `controller_actions!` macro."
)]
pub trait Controller: Send + Sync + 'static {
    /// Look up a publicly routable action.
    fn action(name: &str) -> Option<Action<Self>>
    where
        Self: Sized;
}

/// Object-safe view of a constructed controller.
pub trait DynController: Send + Sync + 'static {
    /// Type name of the concrete controller.
    fn type_name(&self) -> &'static str;

    /// Bind `action` on this instance into a handler.
    ///
    /// Returns `None` if the controller has no action by that name.
    fn bind(self: Arc<Self>, action: &str) -> Option<BoxHandler>;

    /// Access the concrete controller.
    fn as_any(&self) -> &dyn Any;
}

// Blanket implementation: Any type implementing Controller implements DynController automatically.
impl<C: Controller> DynController for C {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<C>()
    }

    fn bind(self: Arc<Self>, action: &str) -> Option<BoxHandler> {
        let call = C::action(action)?;
        Some(Arc::new(move |request: &Request| call(&self, request)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The dependency-construction capability.
///
/// Given a controller identifier, returns a freshly constructed instance.
/// Any failure is reported as an error; the resolver treats all of them alike.
pub trait Injector: Send + Sync {
    /// Construct the controller registered under `id`.
    fn make(&self, id: &str) -> Result<Arc<dyn DynController>, BoxError>;
}

impl<I: Injector + ?Sized> Injector for Arc<I> {
    fn make(&self, id: &str) -> Result<Arc<dyn DynController>, BoxError> {
        (**self).make(id)
    }
}

/// The controller a route resolved to, as seen by dispatch events.
#[derive(Clone)]
pub struct ControllerRef {
    label: String,
    instance: Option<Arc<dyn DynController>>,
}

impl ControllerRef {
    /// Reference to a constructed controller instance.
    pub fn instance(label: impl Into<String>, instance: Arc<dyn DynController>) -> Self {
        Self {
            label: label.into(),
            instance: Some(instance),
        }
    }

    /// Reference to a plain callable handler.
    pub fn callable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instance: None,
        }
    }

    /// The descriptor the route was registered with.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The constructed instance, if the route named a controller.
    pub fn controller(&self) -> Option<&Arc<dyn DynController>> {
        self.instance.as_ref()
    }

    /// Downcast the constructed instance.
    pub fn downcast_ref<C: Controller>(&self) -> Option<&C> {
        self.instance
            .as_deref()
            .and_then(|instance| instance.as_any().downcast_ref::<C>())
    }
}

impl fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRef")
            .field("label", &self.label)
            .field(
                "controller",
                &self.instance.as_ref().map(|instance| instance.type_name()),
            )
            .finish()
    }
}

/// Implement [`Controller`] from a name-to-method table.
///
/// Each method must have the signature `fn(&self, &Request) -> T` with
/// `T: IntoOutcome`.
///
/// ```rust,ignore
/// controller_actions!(WelcomeController {
///     "index" => index,
///     "echo" => echo,
/// });
/// ```
#[macro_export]
macro_rules! controller_actions {
    ($ty:ty { $($name:literal => $method:ident),* $(,)? }) => {
        impl $crate::Controller for $ty {
            fn action(name: &str) -> ::core::option::Option<$crate::Action<Self>> {
                match name {
                    $(
                        $name => {
                            fn call(controller: &$ty, request: &$crate::Request) -> $crate::Outcome {
                                $crate::IntoOutcome::into_outcome(controller.$method(request))
                            }
                            ::core::option::Option::Some(call as $crate::Action<$ty>)
                        }
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
