//! The two dispatch events emitted around handler invocation.

use waypost_core::{BoxHandler, BoxResponse, ControllerRef, DispatchEvent, Request, ResponseLike};

/// Emitted after a route was matched and before its handler runs.
///
/// Setting a response short-circuits the dispatch: the handler is not invoked,
/// [`AfterController`] is not emitted, and the response is returned as-is.
pub struct BeforeController {
    request: Request,
    controller: ControllerRef,
    handler: BoxHandler,
    response: Option<BoxResponse>,
    stopped: bool,
}

impl BeforeController {
    /// Event name listeners are registered under.
    pub const NAME: &'static str = "waypost.before_controller";

    /// Create the event for a matched route.
    pub fn new(request: Request, controller: ControllerRef, handler: BoxHandler) -> Self {
        Self {
            request,
            controller,
            handler,
            response: None,
            stopped: false,
        }
    }

    /// The request being dispatched.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Mutable access to the request the handler will receive.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// The controller the route resolved to.
    pub fn controller(&self) -> &ControllerRef {
        &self.controller
    }

    /// The handler that will be invoked.
    pub fn handler(&self) -> &BoxHandler {
        &self.handler
    }

    /// Invoke `handler` instead of the resolved one.
    pub fn replace_handler(&mut self, handler: BoxHandler) {
        self.handler = handler;
    }

    /// Short-circuit the dispatch with `response`.
    pub fn set_response(&mut self, response: impl ResponseLike) {
        self.response = Some(Box::new(response));
    }

    /// Short-circuit the dispatch with an already boxed response.
    pub fn set_boxed_response(&mut self, response: BoxResponse) {
        self.response = Some(response);
    }

    /// The short-circuit response, if a listener set one.
    pub fn response(&self) -> Option<&dyn ResponseLike> {
        self.response.as_deref()
    }

    /// Remove the short-circuit response.
    pub fn take_response(&mut self) -> Option<BoxResponse> {
        self.response.take()
    }

    /// Skip the listeners registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub(crate) fn into_parts(self) -> (Request, ControllerRef, BoxHandler, Option<BoxResponse>) {
        (self.request, self.controller, self.handler, self.response)
    }
}

impl DispatchEvent for BeforeController {
    const NAME: &'static str = BeforeController::NAME;

    fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

/// Emitted after the handler produced a response.
///
/// Listeners may replace the response. Removing it without putting another
/// one back fails the dispatch.
pub struct AfterController {
    request: Request,
    controller: ControllerRef,
    response: Option<BoxResponse>,
    stopped: bool,
}

impl AfterController {
    /// Event name listeners are registered under.
    pub const NAME: &'static str = "waypost.after_controller";

    /// Create the event for the handler's response.
    pub fn new(request: Request, controller: ControllerRef, response: BoxResponse) -> Self {
        Self {
            request,
            controller,
            response: Some(response),
            stopped: false,
        }
    }

    /// The request that was dispatched.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The controller the route resolved to.
    pub fn controller(&self) -> &ControllerRef {
        &self.controller
    }

    /// The current response.
    pub fn response(&self) -> Option<&dyn ResponseLike> {
        self.response.as_deref()
    }

    /// Replace the response.
    pub fn set_response(&mut self, response: impl ResponseLike) {
        self.response = Some(Box::new(response));
    }

    /// Replace the response with an already boxed one.
    pub fn set_boxed_response(&mut self, response: BoxResponse) {
        self.response = Some(response);
    }

    /// Remove the response, e.g. to wrap it and set it back.
    pub fn take_response(&mut self) -> Option<BoxResponse> {
        self.response.take()
    }

    /// Skip the listeners registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub(crate) fn into_response(self) -> Option<BoxResponse> {
        self.response
    }
}

impl DispatchEvent for AfterController {
    const NAME: &'static str = AfterController::NAME;

    fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}
