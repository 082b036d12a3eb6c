//! Cached bearer token with single-flight acquisition
//!
//! The slot is a tokio Mutex held across the whole check-acquire-cache
//! sequence, so concurrent callers that find it empty queue behind the one
//! acquiring and then reuse its token. At most one acquisition is in flight
//! per store.
//!
//! `invalidate` takes the token out of the slot before calling the server.
//! Because it needs the same lock, an invalidation issued while an
//! acquisition is running waits for it and then invalidates the new token.
//! A `get_token` issued after that sees an empty slot and acquires again.
//! Callers that need a strict order between the two must serialize them.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use transport::Transport;

use crate::constants::Endpoints;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::token::{self, BearerToken};

/// Owner of the one live bearer token for a client.
pub struct TokenStore {
    credentials: Credentials,
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    slot: Mutex<Option<BearerToken>>,
}

impl TokenStore {
    pub fn new(
        credentials: Credentials,
        endpoints: Endpoints,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credentials,
            endpoints,
            transport,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached token, acquiring one first if the slot is empty.
    ///
    /// A failed acquisition leaves the slot empty, so the next call retries.
    pub async fn get_token(&self) -> Result<BearerToken> {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            debug!("using cached bearer token");
            return Ok(token.clone());
        }

        let token =
            token::acquire_token(self.transport.as_ref(), &self.credentials, &self.endpoints)
                .await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Clear the cached token and invalidate it server-side.
    ///
    /// The cache is cleared even when the invalidation call fails; the
    /// failure is still returned. With nothing cached this is a no-op.
    pub async fn invalidate(&self) -> Result<()> {
        let Some(token) = self.slot.lock().await.take() else {
            debug!("no cached bearer token to invalidate");
            return Ok(());
        };

        token::invalidate_token(
            self.transport.as_ref(),
            &self.credentials,
            &self.endpoints,
            &token,
        )
        .await
    }

    /// Whether a token is currently cached. Waits for any running acquisition.
    pub async fn is_cached(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
