//! Request type and route parameter access.

use bytes::Bytes;

/// The request type flowing through the dispatch pipeline.
pub type Request = http::Request<Bytes>;

/// Named parameters captured from the request path by the route table.
///
/// Bindings keep the order in which their placeholders appear in the pattern.
///
/// # Example
///
/// ```rust,ignore
/// // pattern `/users/{id}/posts/{post}` matched against `/users/42/posts/7`
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("post"), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    bindings: Vec<(String, String)>,
}

impl RouteParams {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Get the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the bindings in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Access to route parameters stored on a [`Request`].
///
/// The engine inserts the matched [`RouteParams`] into the request extensions
/// right before the handler is invoked.
pub trait RequestExt {
    /// All parameters bound by the matched route, if any were stored.
    fn route_params(&self) -> Option<&RouteParams>;

    /// A single route parameter.
    fn param(&self, name: &str) -> Option<&str> {
        self.route_params().and_then(|params| params.get(name))
    }
}

impl RequestExt for Request {
    fn route_params(&self) -> Option<&RouteParams> {
        self.extensions().get::<RouteParams>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_keep_pattern_order() {
        let params: RouteParams = [("id", "42"), ("post", "7")].into_iter().collect();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("id", "42"), ("post", "7")]);
        assert_eq!(params.get("post"), Some("7"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn request_reads_params_from_extensions() {
        let mut request = Request::new(Bytes::new());
        assert_eq!(request.param("id"), None);

        request
            .extensions_mut()
            .insert([("id", "42")].into_iter().collect::<RouteParams>());
        assert_eq!(request.param("id"), Some("42"));
    }
}
