//! # Handler Resolution
//!
//! A resolver turns a [`HandlerDescriptor`] into a bound handler. Several
//! resolvers may be configured; the router tries them in registration order
//! until one accepts.
//!
//! Declining is not an error. A resolver that does not understand a descriptor
//! returns [`Resolution::Declined`] so the next variant can take over; errors
//! are reserved for descriptors the resolver accepted but could not satisfy.

use crate::{
    controller::ControllerRef,
    descriptor::HandlerDescriptor,
    error::InvalidHandlerError,
    handler::BoxHandler,
    request::Request,
};

/// A handler bound and ready to invoke, with the controller it came from.
#[derive(Clone)]
pub struct ResolvedHandler {
    /// The invokable unit.
    pub handler: BoxHandler,
    /// The controller reference carried by dispatch events.
    pub controller: ControllerRef,
}

impl std::fmt::Debug for ResolvedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedHandler")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// The result of a resolution attempt.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The resolver bound the descriptor.
    Resolved(ResolvedHandler),
    /// The descriptor is not of a shape this resolver handles.
    Declined,
}

impl Resolution {
    /// The bound handler, if the resolver accepted.
    pub fn resolved(self) -> Option<ResolvedHandler> {
        match self {
            Resolution::Resolved(resolved) => Some(resolved),
            Resolution::Declined => None,
        }
    }

    /// Whether the resolver declined.
    pub fn is_declined(&self) -> bool {
        matches!(self, Resolution::Declined)
    }
}

/// One strategy for turning a descriptor into a handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot resolve handler descriptors",
    label = "missing `HandlerResolver` implementation"
)]
pub trait HandlerResolver: Send + Sync {
    /// Resolve `descriptor` for `request`.
    fn resolve(
        &self,
        request: &Request,
        descriptor: &HandlerDescriptor,
    ) -> Result<Resolution, InvalidHandlerError>;
}
