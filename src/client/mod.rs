//! HTTP client module.
//!
//! [`ApiClient`] executes requests against the configured backend; see
//! [`executor`] for the request lifecycle and the credential switch.

pub mod executor;

pub use executor::{ApiClient, ApiClientBuilder};
