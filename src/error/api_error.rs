//! The uniform error value for transport-layer failures.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// Sentinel status meaning no response was received at all (connection
/// refused, DNS failure, timeout before the first byte).
pub const STATUS_NO_RESPONSE: u16 = 0;

/// Normalized error for any failure of the underlying transport.
///
/// Every failed request produces exactly one of these, immediately
/// propagated to the caller. Callers rely on
/// `status_code == STATUS_NO_RESPONSE` to distinguish "never reached the
/// server" from "server returned an error status"; the original status and
/// body are always preserved, never discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Human-readable description: the server's `error` field when the
    /// body carries one, otherwise the transport's generic description.
    pub message: String,
    /// HTTP status received, or [`STATUS_NO_RESPONSE`] when no response
    /// arrived.
    pub status_code: u16,
    /// The full decoded response body, when a response was received.
    pub raw_body: Option<Value>,
}

impl ApiError {
    /// Builds the error for a response the server actually sent.
    ///
    /// A JSON body's `error` string field wins as the message. A malformed
    /// JSON body and a body without an `error` field fall back identically
    /// to the status line description.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let raw_body = decode_body(body);
        let message = raw_body
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| status.to_string());

        Self {
            message,
            status_code: status.as_u16(),
            raw_body,
        }
    }

    /// Builds the error for a failure with no usable response body.
    ///
    /// The status is the sentinel unless the transport had already seen
    /// one before failing.
    pub(crate) fn from_transport(source: &reqwest::Error) -> Self {
        Self {
            message: source.to_string(),
            status_code: source
                .status()
                .map_or(STATUS_NO_RESPONSE, |s| s.as_u16()),
            raw_body: None,
        }
    }

    /// Builds the error for a transport failure after the status line was
    /// already received (e.g. a timeout while reading the body).
    pub(crate) fn from_partial(status: StatusCode, source: &reqwest::Error) -> Self {
        Self {
            message: source.to_string(),
            status_code: status.as_u16(),
            raw_body: None,
        }
    }

    /// Returns `true` when the failure never reached the server.
    pub fn is_network(&self) -> bool {
        self.status_code == STATUS_NO_RESPONSE
    }
}

/// Decodes a response body losslessly: JSON when it parses, the raw text
/// otherwise, absent when empty.
fn decode_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_network() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (status {})", self.message, self.status_code)
        }
    }
}

impl std::error::Error for ApiError {}
