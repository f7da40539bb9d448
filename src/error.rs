//! Storefront Client Errors
//!
//! Every failure the client can observe while talking to the storefront
//! falls into one of four buckets. Call sites treat them all the same way
//! (log, notify, leave state untouched), but keeping them apart makes the
//! logs useful.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the storefront API client
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The request never produced a response (connection refused, reset, ...)
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("unexpected status {status} from {path}")]
    Status { status: StatusCode, path: String },

    /// The body was missing or was not the JSON shape we expected
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered successfully but flagged the operation as failed
    #[error("rejected by server: {0}")]
    Rejected(String),
}

impl StorefrontError {
    /// Whether the failure happened before any response arrived.
    ///
    /// The storefront words its toasts differently for network trouble.
    pub fn is_transport(&self) -> bool {
        matches!(self, StorefrontError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
