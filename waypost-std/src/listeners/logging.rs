//! Logging listener for dispatch observation.

use crate::events::{AfterController, BeforeController};
use waypost_core::{BoxError, Listener};

/// A listener that logs both dispatch events.
///
/// Register it once per event:
///
/// ```rust,ignore
/// let engine = Engine::builder()
///     .before_controller(LoggingListener::new())
///     .after_controller(LoggingListener::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a listener logging under the default name.
    pub const fn new() -> Self {
        Self::named("waypost")
    }

    /// Create a listener logging under `name`.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name attached to every log record.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener<BeforeController> for LoggingListener {
    fn handle(&self, event: &mut BeforeController) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                listener = self.name,
                method = %event.request().method(),
                path = event.request().uri().path(),
                controller = event.controller().label(),
                "Before controller"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
        Ok(())
    }
}

impl Listener<AfterController> for LoggingListener {
    fn handle(&self, event: &mut AfterController) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                listener = self.name,
                controller = event.controller().label(),
                status = ?event.response().map(|response| response.status()),
                "After controller"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
        Ok(())
    }
}
