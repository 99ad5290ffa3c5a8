//! Transport configuration for the messaging API client.
//!
//! Construction recognizes two environment variables:
//!
//! - `SYNAPSE_API_URL` - backend base URL, defaulting to the local
//!   development endpoint
//! - `SYNAPSE_API_TOKEN` - initial bearer token, defaulting to absent
//!
//! Empty and whitespace-only values are treated as unset.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SYNAPSE_API_URL";

/// Environment variable holding the initial bearer token.
pub const API_TOKEN_ENV: &str = "SYNAPSE_API_TOKEN";

/// Local development endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared transport configuration: base endpoint, request timeout, default
/// headers and the initial bearer credential.
///
/// Constructed once per process and handed to
/// [`ApiClient::with_config`](crate::ApiClient::with_config). At most one
/// credential is attached at a time; replacing it through the client's
/// credential switch fully overwrites the previous value.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all request paths are resolved against.
    pub base_url: Url,
    /// Upper bound on every request, from dispatch to the final byte.
    pub timeout: Duration,
    /// Headers attached to every outgoing request.
    pub default_headers: HeaderMap,
    /// Credential the client starts with, if any.
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration with default settings: a 15 second timeout,
    /// a JSON content type on every request and no credential.
    pub fn new(base_url: Url) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            default_headers,
            bearer_token: None,
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads the base URL from `SYNAPSE_API_URL`, falling back to the
    /// local development endpoint, and the initial bearer token from
    /// `SYNAPSE_API_TOKEN`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the configured base URL
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match env_non_empty(API_URL_ENV) {
            Some(raw) => Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl {
                value: raw,
                source,
            })?,
            None => {
                debug!("{API_URL_ENV} not set, falling back to {DEFAULT_BASE_URL}");
                Url::parse(DEFAULT_BASE_URL).map_err(|source| ConfigError::InvalidBaseUrl {
                    value: DEFAULT_BASE_URL.to_owned(),
                    source,
                })?
            }
        };

        let bearer_token = env_non_empty(API_TOKEN_ENV);
        if bearer_token.is_none() {
            debug!("{API_TOKEN_ENV} not set, requests start without a credential");
        }

        Ok(Self {
            bearer_token,
            ..Self::new(base_url)
        })
    }
}

/// Reads an environment variable, treating empty and whitespace-only
/// values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
