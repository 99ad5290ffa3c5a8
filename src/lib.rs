//! Typed async client for the Synapse messaging backend.
//!
//! The crate is a thin transport layer: parameterized GET and JSON POST
//! requests against a configured base endpoint, every transport failure
//! normalized into a single [`ApiError`] shape, and a runtime credential
//! switch so one running client can impersonate different principals -
//! useful for inspecting both sides of a conversation. Retry and staleness
//! policy belong to the caching layer wrapping this client; nothing here
//! retries.
//!
//! ## Modules
//!
//! - [`client`] - Request execution and the credential switch
//! - [`config`] - Transport configuration and environment loading
//! - [`error`] - Layered error types
//! - [`messages`] - Typed endpoints the app scaffold consumes
//! - [`method`] - HTTP methods of the wire contract
//! - [`query`] - Query parameter values for read requests
//!
//! ## Examples
//!
//! ```rust,no_run
//! use synapse_api::ApiClient;
//!
//! #[derive(serde::Deserialize)]
//! struct UnreadCount { unread_count: u64 }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), synapse_api::ClientError> {
//! let client = ApiClient::from_env()?;
//! let mine: UnreadCount = client.get("/messages/unread-count").await?;
//!
//! // Re-point the credential to see the other side of the conversation.
//! client.set_bearer_token("user-b-token");
//! let theirs: UnreadCount = client.get("/messages/unread-count").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod method;
pub mod query;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ConfigError, STATUS_NO_RESPONSE};
pub use messages::{ApiStatus, UnreadCount};
pub use method::RestMethod;
pub use query::QueryValue;
