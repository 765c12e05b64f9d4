use thiserror::Error;

/// Failures talking to the session store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("document store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("malformed document {game_id}: {reason}")]
    Decode { game_id: String, reason: String },
    #[error("document {0} does not exist")]
    Missing(String),
    #[error("document {0} already exists")]
    Conflict(String),
}
