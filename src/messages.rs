//! Typed surface for the messaging endpoints the app scaffold consumes.
//!
//! The heavier screens bring their own request types and call
//! [`ApiClient::get`](crate::ApiClient::get) directly; this module only
//! covers the endpoints the scaffold itself exercises.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ClientError;

/// Path of the unread-count endpoint.
pub const UNREAD_COUNT_PATH: &str = "/messages/unread-count";

/// Response of `GET /messages/unread-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    /// Number of unread messages for the authenticated principal.
    pub unread_count: u64,
}

/// Outcome of a connectivity probe against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// The backend answered the probe.
    Connected,
    /// The probe failed; `message` carries the rendered error.
    Failed { message: String },
}

impl ApiClient {
    /// Fetches the unread message count for the active credential.
    pub async fn unread_count(&self) -> Result<UnreadCount, ClientError> {
        self.get(UNREAD_COUNT_PATH).await
    }

    /// Probes backend connectivity by fetching the unread count.
    ///
    /// Never fails: any error is folded into [`ApiStatus::Failed`] with
    /// its rendered message, which is what a caller surfaces to the user.
    pub async fn check_connection(&self) -> ApiStatus {
        match self.unread_count().await {
            Ok(_) => ApiStatus::Connected,
            Err(err) => ApiStatus::Failed {
                message: err.to_string(),
            },
        }
    }
}
