//! The built-in welcome controller.

use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;
use waypost_core::{Request, RequestExt, controller_actions, html, text};

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Welcome to Waypost</title>
</head>
<body>
    <h1>Welcome to Waypost</h1>
    <p>Your routes are dispatching. Register your own controllers to replace this page.</p>
</body>
</html>
"#;

/// Errors returned by [`WelcomeController`] actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WelcomeError {
    /// The route did not bind the parameter the action reads.
    #[error("route parameter `{0}` is required")]
    MissingParameter(&'static str),
}

/// A controller serving a static welcome page.
///
/// | action  | response |
/// |---------|----------|
/// | `index` | the welcome page |
/// | `echo`  | the `message` route parameter as plain text |
#[derive(Debug, Clone, Default)]
pub struct WelcomeController {
    page: Option<Bytes>,
}

impl WelcomeController {
    /// Identifier the controller is registered under.
    pub const ID: &'static str = "Welcome";

    /// Create a controller serving the built-in page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller serving `page` instead of the built-in one.
    pub fn with_page(page: impl Into<Bytes>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }

    /// Render the welcome page.
    pub fn index(&self, _request: &Request) -> http::Response<Bytes> {
        let page = self
            .page
            .clone()
            .unwrap_or_else(|| Bytes::from_static(WELCOME_PAGE.as_bytes()));
        html(StatusCode::OK, page)
    }

    /// Echo the `message` route parameter.
    pub fn echo(&self, request: &Request) -> Result<http::Response<Bytes>, WelcomeError> {
        let message = request
            .param("message")
            .ok_or(WelcomeError::MissingParameter("message"))?;
        Ok(text(StatusCode::OK, message.to_owned()))
    }
}

controller_actions!(WelcomeController {
    "index" => index,
    "echo" => echo,
});

#[cfg(feature = "inventory")]
inventory::submit! {
    waypost_std::registry::ControllerRegistration::new(
        WelcomeController::ID,
        waypost_std::registry::construct_default::<WelcomeController>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_core::{ResponseLike, RouteParams, http::header};

    #[test]
    fn test_index_renders_html() {
        let response = WelcomeController::new().index(&Request::new(Bytes::new()));
        assert_eq!(ResponseLike::status(&response), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(response.body().starts_with(b"<!DOCTYPE html>"));
    }

    #[test]
    fn test_index_serves_custom_page() {
        let controller = WelcomeController::with_page("<p>hello</p>");
        let response = controller.index(&Request::new(Bytes::new()));
        assert_eq!(response.body().as_ref(), b"<p>hello</p>");
    }

    #[test]
    fn test_echo_reads_route_parameter() {
        let mut request = Request::new(Bytes::new());
        request
            .extensions_mut()
            .insert([("message", "hello")].into_iter().collect::<RouteParams>());

        let response = WelcomeController::new().echo(&request).unwrap();
        assert_eq!(response.body().as_ref(), b"hello");
    }

    #[test]
    fn test_echo_without_parameter_fails() {
        let err = WelcomeController::new()
            .echo(&Request::new(Bytes::new()))
            .unwrap_err();
        assert_eq!(err, WelcomeError::MissingParameter("message"));
        assert_eq!(err.to_string(), "route parameter `message` is required");
    }
}
