//! # Handlers
//!
//! The terminal point of the dispatch pipeline: one request in, one
//! [`Outcome`] out.
//!
//! Handlers are synchronous. Whatever they return is converted through
//! [`IntoOutcome`]; whether the value is really a response is checked by the
//! engine, not here.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|request: &Request| text(StatusCode::OK, "hi")`
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//! 3. **Controller action**: `"UserController#show"`, resolved at match time

use crate::{
    request::Request,
    response::{IntoOutcome, Outcome},
};
use std::sync::Arc;

/// A shared, type-erased handler.
pub type BoxHandler = Arc<dyn Handler>;

/// An invokable unit of one argument (the request).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests",
    label = "missing `Handler` implementation",
    note = "Handlers are `Fn(&Request) -> T` closures where `T: IntoOutcome`, or implement `Handler` directly."
)]
pub trait Handler: Send + Sync + 'static {
    /// Invoke the handler.
    fn call(&self, request: &Request) -> Outcome;
}

// Blanket impl for closures
impl<F, T> Handler for F
where
    F: Fn(&Request) -> T + Send + Sync + 'static,
    T: IntoOutcome,
{
    fn call(&self, request: &Request) -> Outcome {
        (self)(request).into_outcome()
    }
}

/// Box a closure or handler into a [`BoxHandler`].
pub fn boxed<H: Handler>(handler: H) -> BoxHandler {
    Arc::new(handler)
}
