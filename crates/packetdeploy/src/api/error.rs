//! Errors returned by the API client.

use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-2xx status.
    #[error("API error: {status} - {}", .errors.join("; "))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Messages from the `errors` field of the body, if any.
        errors: Vec<String>,
    },

    /// Invalid configuration. Raised before any request is sent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Success body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Device pagination did not converge on the last page.
    #[error("Pagination stalled at page {page} of {last_page}")]
    Pagination { page: u64, last_page: u64 },
}

impl ApiError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
