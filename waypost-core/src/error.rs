//! Error types for Waypost.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Top-level error returned by a dispatch
//! - [`InvalidHandlerError`] - A handler descriptor could not be turned into a handler
//! - [`InvalidTypeError`] - A handler or listener broke the response contract
//!
//! Route misses are not errors; they are reported as values by the router.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for a dispatch.
///
/// Every variant is fatal to the request it was raised for. Nothing in the
/// pipeline retries or recovers from these.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The matched route's handler descriptor could not be resolved.
    #[error(transparent)]
    InvalidHandler(#[from] InvalidHandlerError),

    /// A handler or listener produced something that is not a response.
    #[error(transparent)]
    InvalidType(#[from] InvalidTypeError),

    /// The handler returned an error of its own.
    #[error("handler failed")]
    Handler(#[source] BoxError),

    /// A listener failed while an event was being emitted.
    #[error("listener for `{event}` failed")]
    Listener {
        /// Name of the event being emitted.
        event: &'static str,
        /// The listener's error.
        #[source]
        source: BoxError,
    },

    /// The final response could not be written out.
    #[error("failed to send response")]
    Send(#[from] std::io::Error),
}

/// Errors raised while resolving a handler descriptor.
#[derive(Error, Debug)]
pub enum InvalidHandlerError {
    /// The injector could not construct the controller.
    #[error("An error was encountered creating the controller for {descriptor}.")]
    Construction {
        /// The full descriptor, e.g. `UserController#show`.
        descriptor: String,
        /// Why construction failed.
        #[source]
        source: BoxError,
    },

    /// The controller was constructed but has no routable action by that name.
    #[error(
        "The controller and action, {controller}::{action}, is not callable. \
         Please ensure that a publicly accessible method is available with this name."
    )]
    NotCallable {
        /// The controller identifier.
        controller: String,
        /// The requested action.
        action: String,
    },

    /// None of the configured resolvers accepted the descriptor.
    #[error("no handler resolver accepted the descriptor {descriptor}")]
    Unresolvable {
        /// The descriptor as it was registered.
        descriptor: String,
    },
}

/// A value produced by a handler or left on an event is not a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{origin} must return an instance of {expected}, \"{actual}\" was returned.")]
pub struct InvalidTypeError {
    /// Who produced the value (`"Controller"`, `"After-controller listeners"`).
    pub origin: &'static str,
    /// The contract the value had to satisfy.
    pub expected: &'static str,
    /// The type name of what was produced instead.
    pub actual: &'static str,
}

impl InvalidTypeError {
    /// Name of the response contract every dispatch output must satisfy.
    pub const EXPECTED: &'static str = "ResponseLike";

    /// A handler returned `actual` instead of a response.
    pub fn from_handler(actual: &'static str) -> Self {
        Self {
            origin: "Controller",
            expected: Self::EXPECTED,
            actual,
        }
    }

    /// After-controller listeners left `actual` on the event instead of a response.
    pub fn from_listeners(actual: &'static str) -> Self {
        Self {
            origin: "After-controller listeners",
            expected: Self::EXPECTED,
            actual,
        }
    }
}
