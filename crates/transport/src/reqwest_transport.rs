//! reqwest-backed production `Transport`
//!
//! Headers are copied in order onto the outgoing request. The HTTP status is
//! never interpreted here: a 401 or 503 comes back as `Ok(HttpResponse)`.

use crate::{HttpRequest, HttpResponse, Method, Result, Transport, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Transport over a shared `reqwest::Client` (connection pooling is per client).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with an optional whole-request timeout.
    ///
    /// `None` leaves reqwest's default policy (no overall timeout) in place.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_str(name)
            .map_err(|e| TransportError::InvalidRequest(format!("header name {name:?}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidRequest(format!("value for header {name}: {e}")))?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + '_>> {
        Box::pin(async move {
            let headers = to_header_map(&request.headers)?;
            let HttpRequest {
                method, url, body, ..
            } = request;

            debug!(%method, url = %url, "sending request");

            let mut builder = self
                .client
                .request(to_reqwest_method(method), url.as_str())
                .headers(headers);
            if let Some(body) = body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        url: url.clone(),
                        source: Box::new(e),
                    }
                } else {
                    TransportError::Send {
                        url: url.clone(),
                        source: Box::new(e),
                    }
                }
            })?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        url: url.clone(),
                        source: Box::new(e),
                    }
                } else {
                    TransportError::Body {
                        url: url.clone(),
                        source: Box::new(e),
                    }
                }
            })?;

            debug!(status, bytes = body.len(), "received response");
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}
