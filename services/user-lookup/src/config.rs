//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The consumer secret is loaded from TWITTER_CONSUMER_SECRET or
//! consumer_secret_file, never stored in the TOML directly to avoid leaking it.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use twitter_app_auth::constants::{API_URL, INVALIDATE_URL, TOKEN_URL, USER_AGENT};
use twitter_app_auth::{Credentials, Endpoints};

const CONSUMER_KEY_ENV: &str = "TWITTER_CONSUMER_KEY";
const CONSUMER_SECRET_ENV: &str = "TWITTER_CONSUMER_SECRET";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Consumer key/secret sources
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub consumer_key: Option<String>,
    /// Path to a file containing the consumer secret
    #[serde(default)]
    pub consumer_secret_file: Option<PathBuf>,
    #[serde(skip)]
    pub consumer_secret: Option<Secret<String>>,
}

/// Endpoint overrides and transport settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_invalidate_url")]
    pub invalidate_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_url: default_token_url(),
            invalidate_url: default_invalidate_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    API_URL.to_owned()
}

fn default_token_url() -> String {
    TOKEN_URL.to_owned()
}

fn default_invalidate_url() -> String {
    INVALIDATE_URL.to_owned()
}

fn default_user_agent() -> String {
    USER_AGENT.to_owned()
}

fn default_timeout() -> u64 {
    30
}

fn check_url(field: &str, url: &str) -> common::Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(common::Error::Config(format!(
            "{field} must start with http:// or https://, got: {url}"
        )))
    }
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Consumer secret resolution order:
    /// 1. TWITTER_CONSUMER_SECRET env var
    /// 2. consumer_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        check_url("api_url", &config.api.api_url)?;
        check_url("token_url", &config.api.token_url)?;
        check_url("invalidate_url", &config.api.invalidate_url)?;

        if config.api.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if let Ok(key) = std::env::var(CONSUMER_KEY_ENV) {
            config.credentials.consumer_key = Some(key);
        }

        if let Ok(secret) = std::env::var(CONSUMER_SECRET_ENV) {
            config.credentials.consumer_secret = Some(Secret::new(secret));
        } else if let Some(ref secret_file) = config.credentials.consumer_secret_file {
            let secret = std::fs::read_to_string(secret_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read consumer_secret_file {}: {e}",
                    secret_file.display()
                ))
            })?;
            let secret = secret.trim().to_owned();
            if !secret.is_empty() {
                config.credentials.consumer_secret = Some(Secret::new(secret));
            }
        }

        match config.credentials.consumer_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(common::Error::Config(format!(
                    "consumer key missing: set credentials.consumer_key or {CONSUMER_KEY_ENV}"
                )));
            }
        }
        if config.credentials.consumer_secret.is_none() {
            return Err(common::Error::Config(format!(
                "consumer secret missing: set credentials.consumer_secret_file or {CONSUMER_SECRET_ENV}"
            )));
        }

        Ok(config)
    }

    /// Consumer credentials for the API client.
    pub fn credentials(&self) -> common::Result<Credentials> {
        let key = self.credentials.consumer_key.clone().unwrap_or_default();
        let secret = self
            .credentials
            .consumer_secret
            .as_ref()
            .map(|s| s.expose().clone())
            .unwrap_or_default();
        Credentials::new(key, secret).map_err(|e| common::Error::Config(e.to_string()))
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            api_url: self.api.api_url.clone(),
            token_url: self.api.token_url.clone(),
            invalidate_url: self.api.invalidate_url.clone(),
            user_agent: self.api.user_agent.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("twitter-app-auth.toml")
    }
}
