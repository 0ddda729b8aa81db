//! # Dispatch Events and Listeners
//!
//! Events are emitted synchronously by the engine around handler invocation.
//! Listeners receive the event mutably and run in registration order; any of
//! them may stop propagation to the listeners registered after it.

use crate::error::BoxError;
use std::any::Any;

/// An event emitted during dispatch.
///
/// Events are keyed by [`DispatchEvent::NAME`] in the emitter.
pub trait DispatchEvent: Any + Send {
    /// The name listeners are registered under.
    const NAME: &'static str;

    /// Whether a listener stopped propagation.
    fn is_propagation_stopped(&self) -> bool;
}

/// Something that reacts to an event of type `E`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot listen to `{E}`",
    label = "missing `Listener<{E}>` implementation",
    note = "Listeners are `Fn(&mut {E})` closures returning `()` or `Result<(), _>`."
)]
pub trait Listener<E>: Send + Sync + 'static {
    /// Called when the event is emitted.
    fn handle(&self, event: &mut E) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<E, F, R> Listener<E> for F
where
    F: Fn(&mut E) -> R + Send + Sync + 'static,
    R: IntoListenerResult,
{
    fn handle(&self, event: &mut E) -> Result<(), BoxError> {
        (self)(event).into_listener_result()
    }
}

/// Conversion of a listener closure's return value.
///
/// - `()` → `Ok(())`
/// - `Result<(), E>` → the error is boxed
pub trait IntoListenerResult {
    /// Convert the value.
    fn into_listener_result(self) -> Result<(), BoxError>;
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> IntoListenerResult for Result<(), E> {
    fn into_listener_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
