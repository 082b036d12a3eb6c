//! Consumer key/secret pair and the Basic-Auth value derived from it
//!
//! The credentials only ever leave the process Basic-Auth encoded, on the
//! token and invalidation requests. Both halves are held as `Secret`s so
//! they never show up in `Debug` output or logs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::Secret;

use crate::error::{Error, Result};
use crate::request::encode_component;

/// Application consumer key and secret.
#[derive(Debug, Clone)]
pub struct Credentials {
    consumer_key: Secret<String>,
    consumer_secret: Secret<String>,
}

impl Credentials {
    /// Both values must be non-empty. No other format checks are made.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
        let consumer_key = consumer_key.into();
        let consumer_secret = consumer_secret.into();
        if consumer_key.trim().is_empty() {
            return Err(Error::InvalidCredentials("consumer key is empty".into()));
        }
        if consumer_secret.trim().is_empty() {
            return Err(Error::InvalidCredentials("consumer secret is empty".into()));
        }
        Ok(Self {
            consumer_key: Secret::new(consumer_key),
            consumer_secret: Secret::new(consumer_secret),
        })
    }

    /// `BASE64(urlencode(key) ":" urlencode(secret))`
    ///
    /// Key and secret are percent-encoded independently before joining, so a
    /// colon inside either one cannot be confused with the separator.
    pub fn basic_auth_value(&self) -> String {
        let joined = format!(
            "{}:{}",
            encode_component(self.consumer_key.expose()),
            encode_component(self.consumer_secret.expose())
        );
        STANDARD.encode(joined)
    }

    /// Full `Authorization` header value for token acquisition/invalidation.
    pub fn basic_auth_header(&self) -> String {
        format!("Basic {}", self.basic_auth_value())
    }
}
