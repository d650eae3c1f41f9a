//! Gateway configuration.
//!
//! The gateway never reads process state on its own. `GatewayConfig` is a
//! plain value handed to `RequestGateway::new`; `from_env` exists for
//! binaries that want the conventional environment variables.

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "/api";

pub const BASE_URL_ENV: &str = "KENNEL_API_URL";
pub const AUTH_TOKEN_ENV: &str = "KENNEL_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Prefix concatenated verbatim in front of every endpoint.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` unless the caller overrides it.
    pub auth_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build a config from `KENNEL_API_URL` and `KENNEL_API_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or empty values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth_token: non_empty(AUTH_TOKEN_ENV),
        }
    }

    /// Headers every request starts from, before caller headers are merged in.
    pub(crate) fn default_headers(&self) -> Vec<(String, String)> {
        let (name, value) = crate::http::DEFAULT_CONTENT_TYPE;
        let mut headers = vec![(name.to_string(), value.to_string())];
        if let Some(token) = &self.auth_token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }
}
