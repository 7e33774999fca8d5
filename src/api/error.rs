//! Catalog transport error types
//!
//! Every failure that can happen while talking to the creature catalog is
//! a transport failure from the gallery's point of view. The variants keep
//! enough context (the URL, the status) to make the log line useful.
//!
//! # Error Types
//!
//! - **`Request`**: The HTTP client could not complete the request
//! - **`Timeout`**: The request did not finish within the configured timeout
//! - **`Status`**: The catalog answered with a non-success status code
//! - **`Decode`**: The response body was not the expected JSON shape
//! - **`InvalidUrl`**: A base URL or detail reference could not be parsed
//! - **`Unavailable`**: The catalog refused service (used by `MockCatalog`)

use thiserror::Error;

/// Catalog transport errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Underlying HTTP client error
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Non-success HTTP status
    #[error("Catalog returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("Error while decoding catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or detail reference is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Catalog is unavailable
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Classify a `reqwest` error for the given URL
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
