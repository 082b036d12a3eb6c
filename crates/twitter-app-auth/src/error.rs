//! Error types for application-only auth and API calls

use transport::{HttpResponse, TransportError};

/// Errors from token management and API calls.
///
/// `Transport` means the server was never reached (or the exchange broke
/// off); every other variant means a response came back but was unusable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected token response: {0}")]
    Auth(String),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pass 2xx responses through; turn anything else into `Error::Api`.
pub(crate) fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::Api {
            status: response.status,
            body: response.text(),
        })
    }
}
