//! Fetch errors
//!
//! Failures of a single candidate. None of these ever reach callers of the
//! fetcher; they only decide whether the chain moves on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("invalid relay envelope: {0}")]
    Envelope(String),
}
