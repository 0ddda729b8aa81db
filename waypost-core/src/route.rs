//! # Route Table
//!
//! Storage and lookup of registered `(method, pattern, descriptor)` triples.
//!
//! Tables are populated during setup and read-only while serving. Lookup
//! reports a miss as a value ([`Lookup::NotFound`] or
//! [`Lookup::MethodNotAllowed`]), never as an error.

use crate::{descriptor::HandlerDescriptor, request::RouteParams};
use http::Method;
use std::fmt;

/// A registered route. Immutable once added.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: String,
    handler: HandlerDescriptor,
}

impl Route {
    /// Create a route. The method is normalised to upper case.
    pub fn new(method: Method, pattern: impl Into<String>, handler: HandlerDescriptor) -> Self {
        Self {
            method: normalize_method(&method),
            pattern: pattern.into(),
            handler,
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The handler descriptor.
    pub fn handler(&self) -> &HandlerDescriptor {
        &self.handler
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}

/// Upper-case a method so matching ignores case.
///
/// Standard methods parse back into their well-known constants.
pub fn normalize_method(method: &Method) -> Method {
    let upper = method.as_str().to_ascii_uppercase();
    if upper == method.as_str() {
        return method.clone();
    }
    Method::from_bytes(upper.as_bytes()).unwrap_or_else(|_| method.clone())
}

/// The result of a table lookup.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// A route matched method and path.
    Found {
        /// The matching route.
        route: &'a Route,
        /// Parameters bound from the path.
        params: RouteParams,
    },
    /// The path matched, but only under other methods.
    MethodNotAllowed {
        /// Methods the path is registered under, in registration order.
        allowed: Vec<Method>,
    },
    /// Nothing matched the path.
    NotFound,
}

impl<'a> Lookup<'a> {
    /// The matched route, if any.
    pub fn found(self) -> Option<(&'a Route, RouteParams)> {
        match self {
            Lookup::Found { route, params } => Some((route, params)),
            _ => None,
        }
    }
}

/// A table of routes.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a route table",
    label = "missing `RouteTable` implementation"
)]
pub trait RouteTable: Send + Sync {
    /// Register a route. No conflict detection is performed.
    fn add(&mut self, route: Route);

    /// Find the route for `method` and `path`.
    fn lookup(&self, method: &Method, path: &str) -> Lookup<'_>;

    /// All routes in registration order.
    fn routes(&self) -> &[Route];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercase_standard_method() {
        let lower = Method::from_bytes(b"get").unwrap();
        assert_ne!(lower, Method::GET);
        assert_eq!(normalize_method(&lower), Method::GET);
    }

    #[test]
    fn normalize_extension_method() {
        let custom = Method::from_bytes(b"purge").unwrap();
        assert_eq!(normalize_method(&custom).as_str(), "PURGE");
    }

    #[test]
    fn route_display() {
        let route = Route::new(Method::GET, "/users/{id}", "Users#show".into());
        assert_eq!(route.to_string(), "GET /users/{id}");
    }
}
