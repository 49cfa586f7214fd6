use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected status {status} from commerce api: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed product response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid product response: {0}")]
    InvalidResponse(String),
}
