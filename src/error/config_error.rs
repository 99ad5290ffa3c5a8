//! Configuration and request construction errors.

use thiserror::Error;

/// Errors raised while assembling the transport configuration or an
/// individual request, before anything is sent over the wire.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid request path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to construct HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_display() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = ConfigError::InvalidBaseUrl {
            value: "not a url".to_string(),
            source,
        };

        assert!(err.to_string().starts_with("invalid base URL \"not a url\""));
    }

    #[test]
    fn test_invalid_header_display() {
        let err = ConfigError::InvalidHeader {
            name: "X Bad".to_string(),
            reason: "invalid HTTP header name".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "invalid header \"X Bad\": invalid HTTP header name"
        );
    }
}
