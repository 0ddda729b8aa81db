//! # Router
//!
//! Composes a [`RouteTable`] with an ordered list of [`HandlerResolver`]s.
//!
//! Registration only stores the route; the descriptor is resolved each time
//! the route is matched. A miss is returned as [`RouteMatch::NotFound`] or
//! [`RouteMatch::MethodNotAllowed`] together with the fallback handlers that
//! turn it into a 404 or 405 response.

use crate::{resolvers::CallableResolver, routing::PatternTable};
use bytes::Bytes;
use http::{HeaderValue, Method, StatusCode, header};
use std::{fmt, sync::Arc};
use waypost_core::{
    BoxHandler, ControllerRef, HandlerDescriptor, HandlerResolver, InvalidHandlerError, Lookup,
    Request, Resolution, ResolvedHandler, Route, RouteParams, RouteTable, text,
};

/// A route that matched a request, with its handler bound.
#[derive(Clone)]
pub struct ResolvedRoute {
    /// The invokable unit.
    pub handler: BoxHandler,
    /// The controller reference carried by dispatch events.
    pub controller: ControllerRef,
    /// Parameters bound from the path.
    pub params: RouteParams,
    /// The matched route.
    pub route: Route,
}

impl fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("route", &self.route)
            .field("controller", &self.controller)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The result of matching a request.
#[derive(Debug, Clone)]
pub enum RouteMatch {
    /// A route matched and its handler was resolved.
    Found(ResolvedRoute),
    /// The path is registered, but not for the request method.
    MethodNotAllowed(Vec<Method>),
    /// No route matched.
    NotFound,
}

impl RouteMatch {
    /// The resolved route, if one matched.
    pub fn found(self) -> Option<ResolvedRoute> {
        match self {
            RouteMatch::Found(resolved) => Some(resolved),
            _ => None,
        }
    }
}

/// Methods the requested path is registered under.
///
/// Stored in the request extensions before the method-not-allowed handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods(pub Vec<Method>);

fn not_found(_request: &Request) -> http::Response<Bytes> {
    text(StatusCode::NOT_FOUND, "Not Found")
}

fn method_not_allowed(request: &Request) -> http::Response<Bytes> {
    let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    if let Some(AllowedMethods(allowed)) = request.extensions().get::<AllowedMethods>() {
        let allow = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&allow) {
            response.headers_mut().insert(header::ALLOW, value);
        }
    }
    response
}

/// Matches requests to routes and resolves their handlers.
pub struct Router<T = PatternTable> {
    table: T,
    resolvers: Vec<Box<dyn HandlerResolver>>,
    not_found: BoxHandler,
    method_not_allowed: BoxHandler,
}

impl Default for Router<PatternTable> {
    /// A [`PatternTable`] router resolving callables only.
    fn default() -> Self {
        let mut router = Router::new(PatternTable::new());
        router.add_resolver(CallableResolver);
        router
    }
}

impl<T: RouteTable> Router<T> {
    /// Create a router over `table` without any resolvers.
    pub fn new(table: T) -> Self {
        Self {
            table,
            resolvers: Vec::new(),
            not_found: Arc::new(not_found),
            method_not_allowed: Arc::new(method_not_allowed),
        }
    }

    /// Append a resolver. Resolvers are tried in the order they were added.
    pub fn add_resolver(&mut self, resolver: impl HandlerResolver + 'static) -> &mut Self {
        self.add_boxed_resolver(Box::new(resolver))
    }

    /// Append an already boxed resolver.
    pub fn add_boxed_resolver(&mut self, resolver: Box<dyn HandlerResolver>) -> &mut Self {
        self.resolvers.push(resolver);
        self
    }

    /// Register a route. The descriptor is not inspected until matched.
    pub fn add_route(
        &mut self,
        method: Method,
        pattern: impl Into<String>,
        handler: impl Into<HandlerDescriptor>,
    ) -> &mut Self {
        self.table.add(Route::new(method, pattern, handler.into()));
        self
    }

    /// Match `request` and resolve the route's handler.
    pub fn match_request(&self, request: &Request) -> Result<RouteMatch, InvalidHandlerError> {
        match self.table.lookup(request.method(), request.uri().path()) {
            Lookup::Found { route, params } => {
                let ResolvedHandler {
                    handler,
                    controller,
                } = self.resolve(request, route.handler())?;

                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(route = %route, controller = controller.label(), "Matched route");
                }

                Ok(RouteMatch::Found(ResolvedRoute {
                    handler,
                    controller,
                    params,
                    route: route.clone(),
                }))
            }
            Lookup::MethodNotAllowed { allowed } => Ok(RouteMatch::MethodNotAllowed(allowed)),
            Lookup::NotFound => Ok(RouteMatch::NotFound),
        }
    }

    /// Run `descriptor` through the resolvers until one accepts.
    pub fn resolve(
        &self,
        request: &Request,
        descriptor: &HandlerDescriptor,
    ) -> Result<ResolvedHandler, InvalidHandlerError> {
        for resolver in &self.resolvers {
            if let Resolution::Resolved(resolved) = resolver.resolve(request, descriptor)? {
                return Ok(resolved);
            }
        }
        Err(InvalidHandlerError::Unresolvable {
            descriptor: descriptor.to_string(),
        })
    }

    /// Handler producing the response for unmatched paths.
    pub fn not_found_handler(&self) -> &BoxHandler {
        &self.not_found
    }

    /// Replace the handler for unmatched paths.
    pub fn set_not_found_handler(&mut self, handler: BoxHandler) -> &mut Self {
        self.not_found = handler;
        self
    }

    /// Handler producing the response for paths registered under other methods.
    ///
    /// The request carries [`AllowedMethods`] in its extensions.
    pub fn method_not_allowed_handler(&self) -> &BoxHandler {
        &self.method_not_allowed
    }

    /// Replace the handler for paths registered under other methods.
    pub fn set_method_not_allowed_handler(&mut self, handler: BoxHandler) -> &mut Self {
        self.method_not_allowed = handler;
        self
    }

    /// All registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    /// The underlying route table.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Number of configured resolvers.
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("resolvers", &self.resolvers.len())
            .finish_non_exhaustive()
    }
}
