//! # waypost - Event-Driven HTTP Dispatch
//!
//! `waypost` turns a request into a response through a small, fixed pipeline:
//! a route table matches the request, a resolver binds the route's handler
//! descriptor to an invokable handler, and the engine runs it between a
//! `BeforeController` and an `AfterController` event. Whatever comes out must
//! be a response; anything else fails the dispatch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::prelude::*;
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register_default::<WelcomeController>(WelcomeController::ID);
//!
//! let mut engine = Engine::builder().injector(registry).build();
//! engine
//!     .get("/", "Welcome#index")
//!     .get("/echo/{message}", "Welcome#echo")
//!     .get("/hello", callable(|_: &Request| text(StatusCode::OK, "hi")));
//!
//! engine.on_before_controller(|event: &mut BeforeController| {
//!     if event.request().headers().contains_key("x-deny") {
//!         event.set_response(text(StatusCode::FORBIDDEN, "denied"));
//!     }
//! });
//!
//! let response = engine.dispatch(request)?;
//! ```
//!
//! ## Handler Descriptors
//!
//! Routes name their handler either as `"<ControllerId>#<action>"`, resolved
//! through an [`Injector`] on every match, or as a callable built with
//! [`callable`]. Resolution happens when a request matches, not when the
//! route is registered.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod controller;

pub use waypost_core::{
    // Controllers
    Action,
    // Errors
    BoxError,
    // Handler
    BoxHandler,
    // Response
    BoxResponse,
    Controller,
    ControllerRef,
    DispatchError,
    // Events
    DispatchEvent,
    DynController,
    Handler,
    // Descriptors
    HandlerDescriptor,
    // Resolvers
    HandlerResolver,
    Injector,
    IntoListenerResult,
    IntoOutcome,
    InvalidHandlerError,
    InvalidTypeError,
    Listener,
    // Routes
    Lookup,
    Outcome,
    // Request
    Request,
    RequestExt,
    Resolution,
    ResolvedHandler,
    ResponseLike,
    Route,
    RouteParams,
    RouteTable,
    boxed,
    callable,
    controller_actions,
    handler,
    html,
    text,
};

pub use waypost_core::{bytes, http};

// Dispatch
pub use waypost_std::{
    emitter::EventEmitter,
    engine::{Engine, EngineBuilder, ResponseSink, WriterSink},
    events::{AfterController, BeforeController},
    registry::{ControllerRegistry, Overrides, RegistryError},
    resolvers::{CallableResolver, ControllerActionResolver},
    router::{AllowedMethods, ResolvedRoute, RouteMatch, Router},
    routing::{Pattern, PatternTable},
};

#[cfg(feature = "inventory")]
pub use waypost_std::registry::{ControllerRegistration, construct_default};

/// Standard listener implementations.
pub mod listeners {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::listeners::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::testing::*;
}

/// Prelude module - common imports for Waypost.
///
/// # Usage
///
/// ```rust,ignore
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Events
        AfterController,
        BeforeController,
        // Errors
        BoxError,
        // Controllers
        ControllerRegistry,
        DispatchError,
        // Dispatch
        Engine,
        // Core traits
        Handler,
        HandlerDescriptor,
        IntoOutcome,
        Listener,
        Request,
        RequestExt,
        ResponseLike,
        controller::WelcomeController,
        callable,
        controller_actions,
        html,
        http::{Method, StatusCode},
        text,
    };
}

#[cfg(feature = "inventory")]
pub use inventory;
