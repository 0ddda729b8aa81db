//! Testing utilities for Waypost.
//!
//! This module provides utilities to make testing engines, listeners, and handlers easier.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that records the dispatch events it receives
//! - [`CountingHandler`]: A handler that counts invocations and answers with a fixed response
//! - [`VecSink`]: A [`ResponseSink`] collecting responses in memory
//! - [`request`]: A shorthand for building bodiless requests

use crate::{
    engine::ResponseSink,
    events::{AfterController, BeforeController},
};
use bytes::Bytes;
use http::{Method, StatusCode};
use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use waypost_core::{BoxError, BoxResponse, Handler, Listener, Outcome, Request, text};

// ============================================================================
// Requests
// ============================================================================

/// Build a request with an empty body.
///
/// # Panics
///
/// Panics if `uri` is not a valid URI.
pub fn request(method: Method, uri: &str) -> Request {
    let mut request = Request::new(Bytes::new());
    *request.method_mut() = method;
    *request.uri_mut() = uri.parse().unwrap_or_else(|err| panic!("invalid uri `{uri}`: {err}"));
    request
}

// ============================================================================
// Recording Listener
// ============================================================================

/// One event observed by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// The event name.
    pub event: &'static str,
    /// The controller label carried by the event.
    pub controller: String,
    /// The response status on the event, if a response was set.
    pub status: Option<StatusCode>,
}

/// A listener that records every dispatch event it receives.
///
/// Clones share the same record, so one clone can be registered for both
/// events while another is kept for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new();
/// let engine = Engine::builder()
///     .before_controller(recorder.clone())
///     .after_controller(recorder.clone())
///     .build();
///
/// engine.dispatch(request(Method::GET, "/hello"))?;
/// assert_eq!(recorder.names(), vec![BeforeController::NAME, AfterController::NAME]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    records: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingListener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn records(&self) -> Vec<Recorded> {
        self.records.lock().unwrap().clone()
    }

    /// Names of the recorded events, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.event)
            .collect()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }

    fn push(&self, record: Recorded) {
        self.records.lock().unwrap().push(record);
    }
}

impl Listener<BeforeController> for RecordingListener {
    fn handle(&self, event: &mut BeforeController) -> Result<(), BoxError> {
        self.push(Recorded {
            event: BeforeController::NAME,
            controller: event.controller().label().to_owned(),
            status: event.response().map(|response| response.status()),
        });
        Ok(())
    }
}

impl Listener<AfterController> for RecordingListener {
    fn handle(&self, event: &mut AfterController) -> Result<(), BoxError> {
        self.push(Recorded {
            event: AfterController::NAME,
            controller: event.controller().label().to_owned(),
            status: event.response().map(|response| response.status()),
        });
        Ok(())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// engine.get("/hello", handler(counter.clone()));
///
/// engine.dispatch(request(Method::GET, "/hello"))?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
    status: StatusCode,
    body: Bytes,
}

impl CountingHandler {
    /// Create a counting handler answering `200 OK`.
    pub fn new() -> Self {
        Self::responding(StatusCode::OK, "ok")
    }

    /// Create a counting handler answering with `status` and `body`.
    pub fn responding(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            status,
            body: body.into(),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for CountingHandler {
    fn call(&self, _request: &Request) -> Outcome {
        self.count.fetch_add(1, Ordering::SeqCst);
        Outcome::Response(Box::new(text(self.status, self.body.clone())))
    }
}

// ============================================================================
// Vec Sink
// ============================================================================

/// A [`ResponseSink`] keeping every response in memory.
#[derive(Default)]
pub struct VecSink {
    responses: Vec<BoxResponse>,
}

impl VecSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The responses sent so far.
    pub fn responses(&self) -> &[BoxResponse] {
        &self.responses
    }

    /// Status codes of the responses sent so far.
    pub fn statuses(&self) -> Vec<StatusCode> {
        self.responses.iter().map(|response| response.status()).collect()
    }

    /// Get the number of responses sent.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Check if nothing was sent.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Take the collected responses.
    pub fn into_inner(self) -> Vec<BoxResponse> {
        self.responses
    }
}

impl ResponseSink for VecSink {
    fn send(&mut self, response: BoxResponse) -> io::Result<()> {
        self.responses.push(response);
        Ok(())
    }
}
