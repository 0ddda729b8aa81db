//! Event emitter: ordered listener lists keyed by event name.

use std::{any::Any, collections::HashMap, fmt, sync::Arc};
use waypost_core::{BoxError, DispatchError, DispatchEvent, Listener};

/// Type-erased listener.
///
/// The event is passed as `&mut dyn Any` and downcast to the concrete type
/// the listener was registered for.
type ErasedListener = Arc<dyn Fn(&mut dyn Any) -> Result<(), BoxError> + Send + Sync>;

/// A synchronous event emitter.
///
/// Listeners are registered during setup and invoked in registration order.
/// Emission stops early when a listener fails or stops propagation.
///
/// # Example
///
/// ```rust,ignore
/// let mut emitter = EventEmitter::new();
/// emitter.add_listener::<BeforeController, _>(|event: &mut BeforeController| {
///     event.set_response(text(StatusCode::FORBIDDEN, "denied"));
/// });
///
/// emitter.emit(&mut event)?;
/// ```
#[derive(Clone, Default)]
pub struct EventEmitter {
    listeners: HashMap<&'static str, Vec<ErasedListener>>,
}

impl EventEmitter {
    /// Create an emitter without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of type `E`.
    pub fn add_listener<E, L>(&mut self, listener: L) -> &mut Self
    where
        E: DispatchEvent,
        L: Listener<E>,
    {
        let erased: ErasedListener =
            Arc::new(move |event: &mut dyn Any| match event.downcast_mut::<E>() {
                Some(event) => listener.handle(event),
                None => Ok(()),
            });
        self.listeners.entry(E::NAME).or_default().push(erased);
        self
    }

    /// Number of listeners registered under `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    /// Invoke the listeners registered for `E`, in order.
    pub fn emit<E: DispatchEvent>(&self, event: &mut E) -> Result<(), DispatchError> {
        let Some(listeners) = self.listeners.get(E::NAME) else {
            return Ok(());
        };

        for listener in listeners {
            if event.is_propagation_stopped() {
                break;
            }
            let erased: &mut dyn Any = &mut *event;
            (**listener)(erased).map_err(|source| DispatchError::Listener {
                event: E::NAME,
                source,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, listeners) in &self.listeners {
            map.entry(name, &listeners.len());
        }
        map.finish()
    }
}
