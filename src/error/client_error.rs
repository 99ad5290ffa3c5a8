//! Top-level error type for client operations.

use thiserror::Error;

use super::{ApiError, ConfigError};

/// Boundary error type returned by every client operation.
///
/// Transport-layer failures are normalized into a single [`ApiError`]
/// shape. Everything else - configuration mistakes, bodies that cannot be
/// encoded, responses that do not match the expected type - keeps its own
/// variant and source error, so programming errors are never disguised as
/// API failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Normalized transport failure: the server rejected the request or
    /// was never reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration or request construction failed before dispatch.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// A success response body did not match the expected type.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The normalized API failure, when this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Status code of the normalized failure, `None` for non-transport
    /// errors.
    pub fn status_code(&self) -> Option<u16> {
        self.as_api().map(|err| err.status_code)
    }
}
