//! Futurama API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Futurama API error (status {status_code})")]
    Status { status_code: u16 },

    #[error("Failed to parse character listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Character fetch ended without a result")]
    Interrupted,

    #[error("Unexpected response body: expected a JSON object, got {0}")]
    UnexpectedBody(&'static str),
}
