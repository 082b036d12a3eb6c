//! HTTP transport abstraction
//!
//! Defines the `Transport` trait the auth client sends every request through.
//! `ReqwestTransport` is the production implementation; tests substitute a
//! scripted transport behind the same trait object.
//!
//! A transport only moves bytes. It reports every HTTP status as `Ok` and
//! leaves status interpretation to the caller. `Err` means the exchange
//! itself did not complete.

pub mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed error used to carry the underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP methods used by the application-only auth flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request. Headers are sent in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name` (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response that made it back from the server, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failures where no HTTP response was obtained.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("request to {url} failed")]
    Send {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("reading response body from {url} failed")]
    Body {
        url: String,
        #[source]
        source: BoxError,
    },
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Request/response exchange used by the auth client.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Transport>`).
/// Implementations must not retry; a failed send is reported once.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + '_>>;
}
