//! Handler descriptors: the raw value a route is registered with.

use crate::{
    handler::{BoxHandler, Handler},
    request::Request,
    response::IntoOutcome,
};
use std::{fmt, sync::Arc};

/// Separator between the controller identifier and the action name.
pub const ACTION_SEPARATOR: char = '#';

/// Identifies how to obtain a route's handler.
///
/// Resolution is deferred until the route is matched; registering a descriptor
/// never fails.
#[derive(Clone)]
pub enum HandlerDescriptor {
    /// A named descriptor, usually `"<ControllerId>#<action>"`.
    Named(String),
    /// A ready-to-call handler.
    Callable(BoxHandler),
}

impl HandlerDescriptor {
    /// The named form, if this is one.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            HandlerDescriptor::Named(name) => Some(name),
            HandlerDescriptor::Callable(_) => None,
        }
    }

    /// Split a named descriptor into its controller-action parts.
    pub fn action_ref(&self) -> Option<ActionRef<'_>> {
        self.as_named().and_then(ActionRef::parse)
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDescriptor::Named(name) => f.write_str(name),
            HandlerDescriptor::Callable(_) => f.write_str("<callable>"),
        }
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDescriptor::Named(name) => f.debug_tuple("Named").field(name).finish(),
            HandlerDescriptor::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl From<&str> for HandlerDescriptor {
    fn from(name: &str) -> Self {
        HandlerDescriptor::Named(name.to_owned())
    }
}

impl From<String> for HandlerDescriptor {
    fn from(name: String) -> Self {
        HandlerDescriptor::Named(name)
    }
}

impl From<BoxHandler> for HandlerDescriptor {
    fn from(handler: BoxHandler) -> Self {
        HandlerDescriptor::Callable(handler)
    }
}

/// Wrap a closure as a [`HandlerDescriptor::Callable`].
///
/// ```rust,ignore
/// engine.get("/hello", callable(|_: &Request| text(StatusCode::OK, "hi")));
/// ```
pub fn callable<F, T>(handler: F) -> HandlerDescriptor
where
    F: Fn(&Request) -> T + Send + Sync + 'static,
    T: IntoOutcome,
{
    HandlerDescriptor::Callable(Arc::new(handler))
}

/// Wrap a [`Handler`] implementation as a descriptor.
pub fn handler<H: Handler>(handler: H) -> HandlerDescriptor {
    HandlerDescriptor::Callable(Arc::new(handler))
}

/// The two halves of a `"<ControllerId>#<action>"` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRef<'a> {
    /// Identifier the injector constructs the controller from.
    pub controller: &'a str,
    /// Action to invoke on the constructed controller.
    pub action: &'a str,
}

impl<'a> ActionRef<'a> {
    /// Split on the first separator. Returns `None` when there is none.
    pub fn parse(descriptor: &'a str) -> Option<Self> {
        descriptor
            .split_once(ACTION_SEPARATOR)
            .map(|(controller, action)| Self { controller, action })
    }
}

impl fmt::Display for ActionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.action)
    }
}
