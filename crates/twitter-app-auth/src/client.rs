//! Authorized API calls
//!
//! `ApiClient::get` is the path most callers use: fetch (or reuse) the bearer
//! token, build the URL and headers, send, then decode the JSON body. The
//! client does not retry and does not re-acquire on a 401; callers that see
//! `Error::Api { status: 401, .. }` can `invalidate_token` and call again.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};
use transport::Transport;

use crate::constants::Endpoints;
use crate::credentials::Credentials;
use crate::error::{Result, ensure_success};
use crate::request::{QueryParams, RequestBuilder};
use crate::store::TokenStore;
use crate::token::BearerToken;

/// Application-only authenticated client for the REST API.
///
/// Safe to share across tasks (`Arc<ApiClient>`); token state is internally
/// synchronized.
pub struct ApiClient {
    requests: RequestBuilder,
    tokens: TokenStore,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client against the production Twitter endpoints.
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self::with_endpoints(credentials, Endpoints::default(), transport)
    }

    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let requests = RequestBuilder::new(endpoints.api_url.clone(), endpoints.user_agent.clone());
        let tokens = TokenStore::new(credentials, endpoints, transport.clone());
        Self {
            requests,
            tokens,
            transport,
        }
    }

    /// GET `endpoint` with `params` and decode the JSON response.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        let token = self.tokens.get_token().await?;
        let request = self.requests.get(endpoint, params, &token);
        debug!(url = %request.url, "calling API");

        let response = ensure_success(self.transport.send(request).await?)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// `users/show.json` for a screen name.
    pub async fn get_user_info(&self, username: &str) -> Result<Value> {
        let mut params = QueryParams::new();
        params.insert("screen_name".to_owned(), username.to_owned());
        self.get("users/show.json", &params).await
    }

    /// Current bearer token, acquiring one if needed.
    pub async fn token(&self) -> Result<BearerToken> {
        self.tokens.get_token().await
    }

    /// Drop the cached token and invalidate it server-side.
    pub async fn invalidate_token(&self) -> Result<()> {
        self.tokens.invalidate().await
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }
}
