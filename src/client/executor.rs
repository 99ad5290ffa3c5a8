//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for executing GET and
//! JSON POST requests against the messaging backend, normalizing every
//! transport failure into [`ApiError`] and attaching whichever bearer
//! credential is active at dispatch time.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, Span};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ConfigError};
use crate::method::RestMethod;
use crate::query::QueryValue;

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ClientConfig,
}

impl ApiClientBuilder {
    /// Creates a new builder with the specified base URL.
    fn new(base_url: Url) -> Self {
        Self {
            config: ClientConfig::new(base_url),
        }
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(base_url)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ClientError> {
        let header_name =
            HeaderName::try_from(name.as_ref()).map_err(|e| ConfigError::InvalidHeader {
                name: name.as_ref().to_owned(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| ConfigError::InvalidHeader {
                name: name.as_ref().to_owned(),
                reason: e.to_string(),
            })?;
        self.config.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Sets the initial bearer credential.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ClientError> {
        ApiClient::with_config(self.config)
    }
}

/// Async HTTP client for the messaging backend.
///
/// Wraps a pooled `reqwest::Client` configured once per process. The
/// bearer credential lives in a runtime slot read at dispatch time, so the
/// same client can switch principals between requests - inspecting both
/// sides of a conversation, say - without rebuilding connection state.
///
/// ## Examples
///
/// ```rust,no_run
/// use url::Url;
/// use synapse_api::ApiClient;
///
/// #[derive(serde::Deserialize)]
/// struct UnreadCount { unread_count: u64 }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), synapse_api::ClientError> {
/// let base_url = Url::parse("http://localhost:8000/api").unwrap();
/// let client = ApiClient::new(base_url)?;
///
/// let count: UnreadCount = client.get("/messages/unread-count").await?;
/// println!("{} unread", count.unread_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a new API client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        Self::builder(base_url).build()
    }

    /// Creates a new API client from environment variables.
    ///
    /// Reads `SYNAPSE_API_URL` and `SYNAPSE_API_TOKEN`; see
    /// [`ClientConfig::from_env`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the configured base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a new API client from an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(config.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ConfigError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            bearer: RwLock::new(config.bearer_token),
        })
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues a read request and decodes the response body as `T`.
    ///
    /// ## Errors
    ///
    /// Fails with [`ClientError::Api`] if the transport rejects, times out
    /// or the server responds with a non-success status.
    pub async fn get<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.execute(RestMethod::Get, path, &[], None).await
    }

    /// Issues a read request with query parameters.
    ///
    /// Pairs whose value is [`QueryValue::Absent`] are omitted from the
    /// request, not sent as empty or null.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let page: MessagePage = client
    ///     .get_with_query("/messages", &[
    ///         ("limit", 50.into()),
    ///         ("cursor", cursor.into()),
    ///     ])
    ///     .await?;
    /// ```
    pub async fn get_with_query<T>(
        &self,
        path: &str,
        query: &[(&str, QueryValue)],
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.execute(RestMethod::Get, path, query, None).await
    }

    /// Issues a write request with a JSON body and decodes the response
    /// body as `T`.
    ///
    /// ## Errors
    ///
    /// Fails with [`ClientError::Serialize`] if the body cannot be encoded
    /// as JSON; otherwise same contract as [`get`](Self::get).
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body =
            serde_json::to_value(body).map_err(|source| ClientError::Serialize { source })?;
        self.execute(RestMethod::Post, path, &[], Some(body)).await
    }

    /// Issues a write request with no body.
    pub async fn post_empty<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.execute(RestMethod::Post, path, &[], None).await
    }

    /// Replaces the bearer credential attached to all subsequent requests.
    ///
    /// The token is opaque to this layer; no shape validation is
    /// performed, and setting the same value twice has no additional
    /// effect. Requests already in flight keep the credential they were
    /// dispatched with, and nothing is persisted across restarts.
    pub fn set_bearer_token(&self, token: impl Into<String>) {
        let token = token.into();
        match self.bearer.write() {
            Ok(mut slot) => *slot = Some(token),
            // The slot holds a plain Option<String>, still valid after a
            // writer panic.
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    /// Credential active right now; requests read this once at dispatch.
    fn bearer_token(&self) -> Option<String> {
        match self.bearer.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Executes a request and parses the response.
    ///
    /// The single funnel behind the public operations: resolves the
    /// endpoint URL, attaches query pairs and the active credential, sends
    /// the request and classifies the outcome. Transport failures
    /// normalize into [`ApiError`]; anything else keeps its own error
    /// shape.
    #[instrument(
        name = "api_request",
        skip(self, method, path, query, body),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn execute<T>(
        &self,
        method: RestMethod,
        path: &str,
        query: &[(&str, QueryValue)],
        body: Option<Value>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        Span::current().record("http.method", method.to_string().as_str());

        let full_url = self.endpoint_url(path)?;
        Span::current().record("http.url", full_url.as_str());

        let mut request = self.http.request(method.to_reqwest(), full_url);

        let pairs: Vec<(&str, String)> = query
            .iter()
            .filter(|(_, value)| !value.is_absent())
            .map(|(name, value)| (*name, value.to_string()))
            .collect();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        // Credential is read once here; a switch mid-flight does not
        // retroactively affect this request.
        if let Some(token) = self.bearer_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if method.has_body() {
            if let Some(body) = &body {
                request = request.json(body);
            }
        }

        // Send request
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_partial(status, &e))?;

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            return Err(ApiError::from_response(status, &bytes).into());
        }

        Span::current().record("otel.status_code", "OK");

        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { source })
    }

    /// Resolves a request path against the configured base URL.
    ///
    /// Resolution is path concatenation, not an RFC 3986 join: a base of
    /// `http://host:8000/api` plus `/messages/unread-count` yields
    /// `http://host:8000/api/messages/unread-count`, keeping the base's
    /// path prefix.
    fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ConfigError::InvalidPath {
            path: path.to_owned(),
            source,
        })
    }
}
