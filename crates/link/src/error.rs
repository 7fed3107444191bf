use thiserror::Error;

use crate::api::Command;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{command} rejected with status {status}")]
    Status {
        command: Command,
        status: reqwest::StatusCode,
    },

    #[error("WebSocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Malformed event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unknown event type: {0}")]
    UnknownEvent(String),

    #[error("Invalid endpoint {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type LinkResult<T> = Result<T, LinkError>;
