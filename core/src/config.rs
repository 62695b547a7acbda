//! Client configuration and variant selection.
//!
//! The bearer token lives here rather than in any ambient global: whatever
//! holds the token hands it to the repository once, at construction.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name and value of the fixed identifying header sent with every request.
pub const CLIENT_HEADER_NAME: &str = "x-custom-header";
pub const CLIENT_HEADER_VALUE: &str = "employee-crud-app";

pub const ENV_BASE_URL: &str = "EMPLOYEE_API_URL";
pub const ENV_TOKEN: &str = "EMPLOYEE_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "EMPLOYEE_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build from `EMPLOYEE_API_URL`, `EMPLOYEE_API_TOKEN` and
    /// `EMPLOYEE_API_TIMEOUT_SECS`, falling back to defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url).with_token(std::env::var(ENV_TOKEN).ok());
        if let Some(secs) = std::env::var(ENV_TIMEOUT_SECS).ok().and_then(|v| v.parse().ok()) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Empty tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks what both variants rely on: an absolute http(s) base URL and a
    /// token that fits in an `Authorization` header.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL `{}`: {e}", self.base_url)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL `{}` must be an http or https URL",
                self.base_url
            )));
        }
        if let Some(token) = &self.token {
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::Config("bearer token is not a valid header value".to_string()))?;
        }
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Which repository implementation backs the controllers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClientVariant {
    /// Configured `reqwest` client with request/response hooks.
    #[default]
    Wrapped,
    /// Thin helper executing plain-data requests through `ureq`.
    Fetch,
}

impl ClientVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientVariant::Wrapped => "wrapped",
            ClientVariant::Fetch => "fetch",
        }
    }
}

impl fmt::Display for ClientVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown client variant `{0}` (expected `wrapped` or `fetch`)")]
pub struct UnknownVariant(pub String);

impl FromStr for ClientVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrapped" | "axios" | "reqwest" => Ok(ClientVariant::Wrapped),
            "fetch" | "ureq" => Ok(ClientVariant::Fetch),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
