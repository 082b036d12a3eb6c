//! Twitter application-only (OAuth2 client-credentials) authentication
//!
//! Exchanges a consumer key/secret for a bearer token, caches it, attaches
//! it to API requests and can invalidate it. All network I/O goes through
//! the `transport::Transport` trait, so the crate has no opinion on the HTTP
//! stack and can be driven by a scripted transport in tests.
//!
//! Request flow:
//! 1. `ApiClient::get` asks `TokenStore::get_token` for a token
//! 2. On an empty cache, `token::acquire_token` POSTs to `oauth2/token`
//! 3. `RequestBuilder` composes the URL and `Authorization: Bearer` header
//! 4. The request is sent and the JSON body decoded
//! 5. `ApiClient::invalidate_token` clears the cache and POSTs to
//!    `oauth2/invalidate_token`

pub mod client;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod request;
pub mod store;
pub mod token;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use constants::Endpoints;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use request::{QueryParams, RequestBuilder, build_auth_header, build_url};
pub use store::TokenStore;
pub use token::{BearerToken, acquire_token, invalidate_token};
