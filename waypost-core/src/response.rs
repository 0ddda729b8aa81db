//! The response contract and handler output conversion.
//!
//! Every dispatch ends in a value implementing [`ResponseLike`]. Handlers may
//! return anything implementing [`IntoOutcome`]; the conversion decides whether
//! the value satisfies the contract. Values that do not are kept as
//! [`Outcome::Invalid`] so the engine can report exactly what was returned.

use crate::error::BoxError;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use std::io::{self, Write};

/// A boxed, type-erased response.
pub type BoxResponse = Box<dyn ResponseLike>;

/// The response-shape contract: status, headers, body and a wire rendering.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a response",
    label = "missing `ResponseLike` implementation",
    note = "Handlers and listeners must produce a value implementing `ResponseLike`."
)]
pub trait ResponseLike: Send + 'static {
    /// The status code.
    fn status(&self) -> StatusCode;

    /// The response headers.
    fn headers(&self) -> &HeaderMap;

    /// The raw body.
    fn body(&self) -> &[u8];

    /// Write the response as an HTTP/1.1 message.
    ///
    /// A `content-length` header is added when the response does not carry one.
    /// Informational, `204 No Content` and `304 Not Modified` responses are
    /// written without `content-length` or body.
    fn send(&self, out: &mut dyn Write) -> io::Result<()> {
        let status = self.status();
        write!(
            out,
            "HTTP/1.1 {} {}\r\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )?;
        let headers = self.headers();
        for (name, value) in headers {
            out.write_all(name.as_str().as_bytes())?;
            out.write_all(b": ")?;
            out.write_all(value.as_bytes())?;
            out.write_all(b"\r\n")?;
        }
        if !allows_body(status) {
            return out.write_all(b"\r\n");
        }
        let body = self.body();
        if !headers.contains_key(header::CONTENT_LENGTH) {
            write!(out, "content-length: {}\r\n", body.len())?;
        }
        out.write_all(b"\r\n")?;
        out.write_all(body)
    }

    /// Render the response into a buffer.
    fn serialize(&self) -> io::Result<Bytes> {
        let mut buf = Vec::with_capacity(self.body().len() + 64);
        self.send(&mut buf)?;
        Ok(Bytes::from(buf))
    }
}

impl<B> ResponseLike for http::Response<B>
where
    B: AsRef<[u8]> + Send + 'static,
{
    fn status(&self) -> StatusCode {
        http::Response::status(self)
    }

    fn headers(&self) -> &HeaderMap {
        http::Response::headers(self)
    }

    fn body(&self) -> &[u8] {
        http::Response::body(self).as_ref()
    }
}

/// Build a plain-text response.
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> http::Response<Bytes> {
    let mut response = http::Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Build an HTML response.
pub fn html(status: StatusCode, body: impl Into<Bytes>) -> http::Response<Bytes> {
    let mut response = http::Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// The type-erased result of invoking a handler.
pub enum Outcome {
    /// The handler produced a response.
    Response(BoxResponse),
    /// The handler returned an error.
    Failed(BoxError),
    /// The handler produced a value that is not a response.
    Invalid {
        /// Type name of the produced value.
        type_name: &'static str,
    },
}

impl Outcome {
    /// Record a non-response value of type `T`.
    pub fn invalid<T: ?Sized>() -> Self {
        Outcome::Invalid {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Whether the outcome carries a response.
    pub fn is_response(&self) -> bool {
        matches!(self, Outcome::Response(_))
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Response(response) => f
                .debug_tuple("Response")
                .field(&response.status())
                .finish(),
            Outcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            Outcome::Invalid { type_name } => f
                .debug_struct("Invalid")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// Conversion of a handler's return value into an [`Outcome`].
///
/// # Default Implementations
///
/// - `http::Response<B>`, [`BoxResponse`] → `Response`
/// - `Result<T, E>` → delegates to `T`, or `Failed` with the error
/// - `Option<T>` → delegates to `T`, or `Invalid` for `None`
/// - `()`, `String`, `&'static str`, `bool`, integers, `Bytes`, `Vec<u8>` → `Invalid`
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "missing `IntoOutcome` implementation",
    note = "Return a type implementing `ResponseLike`, or implement `IntoOutcome`."
)]
pub trait IntoOutcome {
    /// Convert the value.
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl<B> IntoOutcome for http::Response<B>
where
    B: AsRef<[u8]> + Send + 'static,
{
    fn into_outcome(self) -> Outcome {
        Outcome::Response(Box::new(self))
    }
}

impl IntoOutcome for BoxResponse {
    fn into_outcome(self) -> Outcome {
        Outcome::Response(self)
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(value) => value.into_outcome(),
            Err(err) => Outcome::Failed(err.into()),
        }
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Outcome {
        match self {
            Some(value) => value.into_outcome(),
            None => Outcome::invalid::<Self>(),
        }
    }
}

macro_rules! not_a_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOutcome for $ty {
                fn into_outcome(self) -> Outcome {
                    Outcome::invalid::<$ty>()
                }
            }
        )*
    };
}

not_a_response!(
    (),
    bool,
    String,
    &'static str,
    Bytes,
    Vec<u8>,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
);

fn allows_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}
