//! Layered error types for the messaging API client.
//!
//! The hierarchy keeps transport failures and programming errors apart:
//! - [`ClientError`] - Boundary type returned by every client operation
//! - [`ApiError`] - Uniform shape of every normalized transport failure
//! - [`ConfigError`] - Configuration and request construction errors

mod api_error;
mod client_error;
mod config_error;

pub use api_error::{ApiError, STATUS_NO_RESPONSE};
pub use client_error::ClientError;
pub use config_error::ConfigError;
