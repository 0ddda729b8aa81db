//! The default route table.

use super::pattern::Pattern;
use http::Method;
use waypost_core::{Lookup, Route, RouteTable, normalize_method};

/// A route table that scans its routes linearly.
///
/// # Tie-break
///
/// When several routes match the same method and path, the most specific one
/// wins: patterns are compared segment by segment, a static segment beating a
/// parameter and a parameter beating a catch-all. Routes of equal specificity
/// resolve to the one registered first.
///
/// ```rust,ignore
/// table.add(Route::new(Method::GET, "/users/{id}", "Users#show".into()));
/// table.add(Route::new(Method::GET, "/users/new", "Users#create_form".into()));
///
/// // `/users/new` wins although it was registered last.
/// ```
#[derive(Debug, Default)]
pub struct PatternTable {
    routes: Vec<Route>,
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteTable for PatternTable {
    fn add(&mut self, route: Route) {
        self.patterns.push(Pattern::parse(route.pattern()));
        self.routes.push(route);
    }

    fn lookup(&self, method: &Method, path: &str) -> Lookup<'_> {
        let method = normalize_method(method);
        let mut best: Option<(&Route, &Pattern, _)> = None;
        let mut allowed: Vec<Method> = Vec::new();

        for (route, pattern) in self.routes.iter().zip(&self.patterns) {
            let Some(params) = pattern.matches(path) else {
                continue;
            };

            if route.method() != &method {
                if !allowed.contains(route.method()) {
                    allowed.push(route.method().clone());
                }
                continue;
            }

            let more_specific = match &best {
                Some((_, current, _)) => pattern.specificity() < current.specificity(),
                None => true,
            };
            if more_specific {
                best = Some((route, pattern, params));
            }
        }

        match best {
            Some((route, _, params)) => Lookup::Found { route, params },
            None if !allowed.is_empty() => Lookup::MethodNotAllowed { allowed },
            None => Lookup::NotFound,
        }
    }

    fn routes(&self) -> &[Route] {
        &self.routes
    }
}
