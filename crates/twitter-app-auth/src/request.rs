//! URL and header composition for authorized API calls
//!
//! Everything here is pure: no I/O, no failure paths. Endpoint names are not
//! validated; a malformed endpoint simply produces a URL the server rejects.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use transport::{HttpRequest, Method};
use url::Url;

use crate::token::BearerToken;

/// Query parameters for a resource call.
///
/// Insertion order is preserved and is the order they appear in the URL.
pub type QueryParams = IndexMap<String, String>;

/// RFC 3986 unreserved characters are left alone; everything else is `%XX`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single URL component (query key/value, credential half).
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Join `base` and `endpoint` with a single `/`, then append the encoded
/// query string. An empty parameter map adds no `?`.
pub fn build_url(base: &str, endpoint: &str, params: &QueryParams) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }
    url
}

pub fn build_auth_header(token: &BearerToken) -> String {
    format!("Bearer {}", token.value())
}

/// `host[:port]` of an absolute URL, used as the `Host` header.
///
/// Userinfo is dropped and a default port is omitted. `None` when the URL
/// does not parse or has no host; the transport then derives `Host` itself.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// Prefix `headers` with `Host` derived from `url`, when it has one.
pub(crate) fn with_host(url: &str, headers: Vec<(String, String)>) -> Vec<(String, String)> {
    match host_of(url) {
        Some(host) => std::iter::once(("Host".to_owned(), host))
            .chain(headers)
            .collect(),
        None => headers,
    }
}

/// Builds GET requests against a fixed API base.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_url: String,
    user_agent: String,
}

impl RequestBuilder {
    pub fn new(api_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn url(&self, endpoint: &str, params: &QueryParams) -> String {
        build_url(&self.api_url, endpoint, params)
    }

    /// Headers are `Host`, `User-Agent`, `Authorization`, in that order.
    pub fn get(&self, endpoint: &str, params: &QueryParams, token: &BearerToken) -> HttpRequest {
        let url = self.url(endpoint, params);
        let headers = with_host(
            &url,
            vec![
                ("User-Agent".to_owned(), self.user_agent.clone()),
                ("Authorization".to_owned(), build_auth_header(token)),
            ],
        );
        HttpRequest {
            method: Method::Get,
            url,
            headers,
            body: None,
        }
    }
}
