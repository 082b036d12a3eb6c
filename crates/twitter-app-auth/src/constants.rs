//! Twitter application-only auth endpoints and protocol literals
//!
//! These are the production values. `Endpoints` lets callers point the
//! client elsewhere (a local test server, a proxy).

/// Base of all REST resource URLs (`users/show.json` etc. are appended)
pub const API_URL: &str = "https://api.twitter.com/1.1/";

/// Bearer token acquisition endpoint
pub const TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

/// Bearer token invalidation endpoint
pub const INVALIDATE_URL: &str = "https://api.twitter.com/oauth2/invalidate_token";

/// User-Agent sent with every request unless overridden
pub const USER_AGENT: &str = "TwitterAppAuth v 0.0.2";

/// The only `token_type` the token endpoint may return
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Form body for bearer token acquisition
pub const GRANT_TYPE_BODY: &str = "grant_type=client_credentials";

pub const TOKEN_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

pub const INVALIDATE_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Set of URLs and the user agent a client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub token_url: String,
    pub invalidate_url: String,
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_owned(),
            token_url: TOKEN_URL.to_owned(),
            invalidate_url: INVALIDATE_URL.to_owned(),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_point_at_twitter() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.api_url, "https://api.twitter.com/1.1/");
        assert_eq!(endpoints.token_url, "https://api.twitter.com/oauth2/token");
        assert_eq!(
            endpoints.invalidate_url,
            "https://api.twitter.com/oauth2/invalidate_token"
        );
        assert_eq!(endpoints.user_agent, USER_AGENT);
    }

    #[test]
    fn grant_type_body_length_matches_wire_format() {
        // Body of every token request, byte for byte
        assert_eq!(GRANT_TYPE_BODY.len(), 29);
    }
}
