//! Error types for registry requests.
//!
//! These never reach tool callers: the registry client logs them and reports
//! absence instead.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while talking to UniProt or AlphaFold.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {source}")]
    Client {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid registry URL: {url}")]
    InvalidUrl {
        /// The offending base URL.
        url: String,
    },

    /// The registry did not answer within the configured timeout.
    #[error("Request to {url} timed out after {}s", timeout.as_secs())]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that expired.
        timeout: Duration,
    },

    /// Connection, DNS or other transport failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Classifies a reqwest failure, separating timeouts from other transport errors.
    pub(crate) fn from_reqwest(url: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}
