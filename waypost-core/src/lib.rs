//! # waypost-core
//!
//! Core contracts for the Waypost HTTP dispatch pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! controllers, resolvers and listeners that don't need the `waypost-std`
//! implementations.
//!
//! # The Dispatch Pipeline
//!
//! ```text
//! Request → RouteTable::lookup → HandlerResolver::resolve → ResolvedHandler
//!         → BeforeController event → Handler::call → AfterController event
//!         → ResponseLike
//! ```
//!
//! ## Routes ([`RouteTable`])
//!
//! Stores `(method, pattern, descriptor)` triples and matches a method and
//! path against them, extracting [`RouteParams`].
//!
//! ## Descriptors and Resolvers ([`HandlerDescriptor`], [`HandlerResolver`])
//!
//! A descriptor is either a `"<ControllerId>#<action>"` name or a callable.
//! Resolvers turn descriptors into [`Handler`]s, constructing controllers
//! through an [`Injector`] when needed.
//!
//! ## Responses ([`ResponseLike`], [`IntoOutcome`])
//!
//! Every dispatch produces a value satisfying the response contract. Handler
//! return values are converted into an [`Outcome`], which records values that
//! are not responses so they can be rejected.
//!
//! ## Events ([`DispatchEvent`], [`Listener`])
//!
//! Synchronous, ordered interception points around handler invocation.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Top-level error type
//! - [`InvalidHandlerError`] - Descriptor resolution errors
//! - [`InvalidTypeError`] - Response contract violations

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod controller;
mod descriptor;
mod error;
mod event;
mod handler;
mod request;
mod resolver;
mod response;
mod route;

// Re-exports
pub use controller::{Action, Controller, ControllerRef, DynController, Injector};
pub use descriptor::{ACTION_SEPARATOR, ActionRef, HandlerDescriptor, callable, handler};
pub use error::{BoxError, DispatchError, InvalidHandlerError, InvalidTypeError};
pub use event::{DispatchEvent, IntoListenerResult, Listener};
pub use handler::{BoxHandler, Handler, boxed};
pub use request::{Request, RequestExt, RouteParams};
pub use resolver::{HandlerResolver, Resolution, ResolvedHandler};
pub use response::{BoxResponse, IntoOutcome, Outcome, ResponseLike, html, text};
pub use route::{Lookup, Route, RouteTable, normalize_method};

// Used by `controller_actions!` and downstream crates.
pub use bytes;
pub use http;
