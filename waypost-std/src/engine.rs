//! # Dispatch Engine
//!
//! Drives a request through the pipeline:
//!
//! ```text
//! match ─┬─ miss ──────────────→ fallback handler ──────────────→ response
//!        └─ found → BeforeController ─┬─ response set ──────────→ response
//!                                     └─ handler → AfterController → response
//! ```
//!
//! Every output is checked against the response contract. A handler returning
//! something that is not a response fails the dispatch with an
//! [`InvalidTypeError`].

use crate::{
    emitter::EventEmitter,
    events::{AfterController, BeforeController},
    resolvers::{CallableResolver, ControllerActionResolver},
    router::{AllowedMethods, RouteMatch, Router},
    routing::PatternTable,
};
use futures::{Stream, StreamExt};
use http::Method;
use std::{
    io::{self, Write},
    pin::pin,
    sync::Arc,
};
use waypost_core::{
    BoxHandler, BoxResponse, DispatchError, DispatchEvent, Handler, HandlerDescriptor,
    HandlerResolver, Injector, IntoListenerResult, InvalidTypeError, Listener, Outcome, Request,
    RouteTable, boxed,
};

/// Destination for final responses.
pub trait ResponseSink {
    /// Deliver one response.
    fn send(&mut self, response: BoxResponse) -> io::Result<()>;
}

/// Writes every response to `W` as an HTTP/1.1 message.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Create a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for WriterSink<W> {
    fn send(&mut self, response: BoxResponse) -> io::Result<()> {
        response.send(&mut self.writer)?;
        self.writer.flush()
    }
}

/// The dispatch engine: a [`Router`] plus the dispatch events' listeners.
///
/// Setup goes through `&mut self`; dispatching only needs `&self`, so a built
/// engine can be shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = Engine::new();
/// engine.get("/hello", callable(|_: &Request| text(StatusCode::OK, "hi")));
/// engine.on_before_controller(|event: &mut BeforeController| {
///     if event.request().headers().contains_key("x-deny") {
///         event.set_response(text(StatusCode::FORBIDDEN, "denied"));
///     }
/// });
///
/// let response = engine.dispatch(request)?;
/// ```
#[derive(Debug)]
pub struct Engine<T = PatternTable> {
    router: Router<T>,
    emitter: EventEmitter,
}

impl Engine<PatternTable> {
    /// Create an engine resolving callables only.
    ///
    /// Use [`Engine::builder`] to resolve controller-action descriptors.
    pub fn new() -> Self {
        Self::with_router(Router::default())
    }

    /// Start configuring an engine over a [`PatternTable`].
    pub fn builder() -> EngineBuilder<PatternTable> {
        EngineBuilder::new(PatternTable::new())
    }
}

impl Default for Engine<PatternTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RouteTable> Engine<T> {
    /// Create an engine around a configured router.
    pub fn with_router(router: Router<T>) -> Self {
        Self {
            router,
            emitter: EventEmitter::new(),
        }
    }

    /// The router.
    pub fn router(&self) -> &Router<T> {
        &self.router
    }

    /// Mutable access to the router, e.g. to add resolvers.
    pub fn router_mut(&mut self) -> &mut Router<T> {
        &mut self.router
    }

    /// The event emitter.
    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// Register a route for `method`.
    pub fn route(
        &mut self,
        method: Method,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.router.add_route(method, pattern, handler);
        self
    }

    /// Register a `GET` route.
    pub fn get(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(Method::GET, pattern, handler)
    }

    /// Register a `POST` route.
    pub fn post(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(Method::POST, pattern, handler)
    }

    /// Register a `PUT` route.
    pub fn put(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(Method::PUT, pattern, handler)
    }

    /// Register a `PATCH` route.
    pub fn patch(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(Method::PATCH, pattern, handler)
    }

    /// Register a `DELETE` route.
    pub fn delete(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Register a route for an arbitrary method.
    pub fn custom_method(
        &mut self,
        method: Method,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.route(method, pattern, handler)
    }

    /// Register a listener for events of type `E`.
    pub fn add_listener<E, L>(&mut self, listener: L) -> &mut Self
    where
        E: DispatchEvent,
        L: Listener<E>,
    {
        self.emitter.add_listener::<E, L>(listener);
        self
    }

    /// Register a closure run before every matched handler.
    pub fn on_before_controller<F, R>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(&mut BeforeController) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.add_listener::<BeforeController, F>(listener)
    }

    /// Register a closure run after every matched handler.
    pub fn on_after_controller<F, R>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(&mut AfterController) -> R + Send + Sync + 'static,
        R: IntoListenerResult,
    {
        self.add_listener::<AfterController, F>(listener)
    }

    /// Dispatch one request to its final response.
    pub fn dispatch(&self, request: Request) -> Result<BoxResponse, DispatchError> {
        let result = self.dispatch_inner(request);

        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "Dispatch failed");
            }
        }

        result
    }

    fn dispatch_inner(&self, mut request: Request) -> Result<BoxResponse, DispatchError> {
        let resolved = match self.router.match_request(&request)? {
            RouteMatch::Found(resolved) => resolved,
            RouteMatch::NotFound => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(method = %request.method(), path = request.uri().path(), "No route matched");
                }
                return invoke(self.router.not_found_handler(), &request);
            }
            RouteMatch::MethodNotAllowed(allowed) => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(method = %request.method(), path = request.uri().path(), ?allowed, "Method not allowed");
                }
                request.extensions_mut().insert(AllowedMethods(allowed));
                return invoke(self.router.method_not_allowed_handler(), &request);
            }
        };

        request.extensions_mut().insert(resolved.params);

        let mut before = BeforeController::new(request, resolved.controller, resolved.handler);
        self.emitter.emit(&mut before)?;
        let (request, controller, handler, response) = before.into_parts();

        if let Some(response) = response {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(controller = controller.label(), status = %response.status(), "Short-circuited before controller");
            }
            return Ok(response);
        }

        let response = invoke(&handler, &request)?;

        let mut after = AfterController::new(request, controller, response);
        self.emitter.emit(&mut after)?;
        after
            .into_response()
            .ok_or_else(|| InvalidTypeError::from_listeners("()").into())
    }

    /// Dispatch every request from `requests`, delivering responses to `sink`.
    ///
    /// Stops at the first failing request, which sends nothing. Returns the
    /// number of responses sent.
    pub async fn run<S, K>(&self, requests: S, sink: &mut K) -> Result<usize, DispatchError>
    where
        S: Stream<Item = Request>,
        K: ResponseSink + ?Sized,
    {
        let mut requests = pin!(requests);
        let mut sent = 0;
        while let Some(request) = requests.next().await {
            let response = self.dispatch(request)?;
            sink.send(response)?;
            sent += 1;
        }
        Ok(sent)
    }
}

/// Call `handler` and enforce the response contract on its outcome.
fn invoke(handler: &BoxHandler, request: &Request) -> Result<BoxResponse, DispatchError> {
    match handler.call(request) {
        Outcome::Response(response) => Ok(response),
        Outcome::Failed(err) => Err(DispatchError::Handler(err)),
        Outcome::Invalid { type_name } => Err(InvalidTypeError::from_handler(type_name).into()),
    }
}

/// Builder for constructing an [`Engine`].
///
/// Resolvers are consulted in this order: the controller-action resolver (when
/// an injector is set), custom resolvers in the order they were added, then
/// the callable resolver.
pub struct EngineBuilder<T> {
    table: T,
    injector: Option<Arc<dyn Injector>>,
    resolvers: Vec<Box<dyn HandlerResolver>>,
    not_found: Option<BoxHandler>,
    method_not_allowed: Option<BoxHandler>,
    emitter: EventEmitter,
}

impl<T: RouteTable> EngineBuilder<T> {
    /// Start configuring an engine over `table`.
    pub fn new(table: T) -> Self {
        Self {
            table,
            injector: None,
            resolvers: Vec::new(),
            not_found: None,
            method_not_allowed: None,
            emitter: EventEmitter::new(),
        }
    }

    /// Resolve `"<ControllerId>#<action>"` descriptors through `injector`.
    pub fn injector(mut self, injector: impl Injector + 'static) -> Self {
        self.injector = Some(Arc::new(injector));
        self
    }

    /// Add a custom resolver.
    pub fn resolver(mut self, resolver: impl HandlerResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Handler producing the response for unmatched paths.
    pub fn not_found(mut self, handler: impl Handler) -> Self {
        self.not_found = Some(boxed(handler));
        self
    }

    /// Handler producing the response for paths registered under other methods.
    pub fn method_not_allowed(mut self, handler: impl Handler) -> Self {
        self.method_not_allowed = Some(boxed(handler));
        self
    }

    /// Register a listener for events of type `E`.
    pub fn listener<E, L>(mut self, listener: L) -> Self
    where
        E: DispatchEvent,
        L: Listener<E>,
    {
        self.emitter.add_listener::<E, L>(listener);
        self
    }

    /// Register a [`BeforeController`] listener.
    pub fn before_controller(self, listener: impl Listener<BeforeController>) -> Self {
        self.listener::<BeforeController, _>(listener)
    }

    /// Register an [`AfterController`] listener.
    pub fn after_controller(self, listener: impl Listener<AfterController>) -> Self {
        self.listener::<AfterController, _>(listener)
    }

    /// Build the engine.
    pub fn build(self) -> Engine<T> {
        let mut router = Router::new(self.table);
        if let Some(injector) = self.injector {
            router.add_resolver(ControllerActionResolver::new(injector));
        }
        for resolver in self.resolvers {
            router.add_boxed_resolver(resolver);
        }
        router.add_resolver(CallableResolver);

        if let Some(handler) = self.not_found {
            router.set_not_found_handler(handler);
        }
        if let Some(handler) = self.method_not_allowed {
            router.set_method_not_allowed_handler(handler);
        }

        Engine {
            router,
            emitter: self.emitter,
        }
    }
}
