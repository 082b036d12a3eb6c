//! Bearer token acquisition and invalidation
//!
//! Handles the two token endpoint interactions:
//! 1. Acquisition: `POST oauth2/token` with `grant_type=client_credentials`
//! 2. Invalidation: `POST oauth2/invalidate_token` with the current token
//!
//! Both authenticate with the Basic-Auth value derived from the consumer
//! credentials. Tokens carry no expiry; one stays valid until invalidated.

use common::Secret;
use serde_json::Value;
use tracing::info;
use transport::{HttpRequest, Method, Transport};

use crate::constants::{
    Endpoints, GRANT_TYPE_BODY, INVALIDATE_CONTENT_TYPE, TOKEN_CONTENT_TYPE, TOKEN_TYPE_BEARER,
};
use crate::credentials::Credentials;
use crate::error::{Error, Result, ensure_success};
use crate::request::with_host;

/// Application bearer token. Never empty; redacted in `Debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Secret::new(value.into()))
    }

    pub fn value(&self) -> &str {
        self.0.expose()
    }
}

/// Validate a token endpoint body: `token_type` must be exactly `"bearer"`
/// and `access_token` a non-empty string.
pub fn parse_token_response(body: &[u8]) -> Result<BearerToken> {
    let json: Value = serde_json::from_slice(body)?;

    match json.get("token_type").and_then(Value::as_str) {
        Some(TOKEN_TYPE_BEARER) => {}
        Some(other) => {
            return Err(Error::Auth(format!(
                "token_type is {other:?}, expected \"{TOKEN_TYPE_BEARER}\""
            )));
        }
        None => return Err(Error::Auth("missing token_type".into())),
    }

    match json.get("access_token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(BearerToken::new(token)),
        Some(_) => Err(Error::Auth("access_token is empty".into())),
        None => Err(Error::Auth("missing access_token".into())),
    }
}

fn basic_auth_request(
    url: &str,
    credentials: &Credentials,
    user_agent: &str,
    extra_headers: &[(&str, &str)],
    body: String,
) -> HttpRequest {
    let mut headers = vec![
        ("User-Agent".to_owned(), user_agent.to_owned()),
        ("Authorization".to_owned(), credentials.basic_auth_header()),
    ];
    headers.extend(
        extra_headers
            .iter()
            .map(|(n, v)| ((*n).to_owned(), (*v).to_owned())),
    );
    let headers = with_host(url, headers);
    HttpRequest {
        method: Method::Post,
        url: url.to_owned(),
        headers,
        body: Some(body),
    }
}

/// Exchange the consumer credentials for a bearer token.
pub async fn acquire_token(
    transport: &dyn Transport,
    credentials: &Credentials,
    endpoints: &Endpoints,
) -> Result<BearerToken> {
    let request = basic_auth_request(
        &endpoints.token_url,
        credentials,
        &endpoints.user_agent,
        &[("Content-Type", TOKEN_CONTENT_TYPE)],
        GRANT_TYPE_BODY.to_owned(),
    );

    let response = ensure_success(transport.send(request).await?)?;
    let token = parse_token_response(&response.body)?;
    info!("acquired bearer token");
    Ok(token)
}

/// Ask the server to invalidate `token`.
///
/// The response body is not inspected; only transport failure and non-2xx
/// status are reported.
pub async fn invalidate_token(
    transport: &dyn Transport,
    credentials: &Credentials,
    endpoints: &Endpoints,
    token: &BearerToken,
) -> Result<()> {
    let request = basic_auth_request(
        &endpoints.invalidate_url,
        credentials,
        &endpoints.user_agent,
        &[("Accept", "*/*"), ("Content-Type", INVALIDATE_CONTENT_TYPE)],
        format!("access_token={}", token.value()),
    );

    ensure_success(transport.send(request).await?)?;
    info!("invalidated bearer token");
    Ok(())
}
