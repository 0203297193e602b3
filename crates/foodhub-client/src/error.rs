use reqwest::StatusCode;

/// Fallback message when a failed response carries no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a failure status. Displays as the bare
    /// message so page handlers can show it as-is.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

impl ClientError {
    /// Builds the application failure for a non-success response body.
    pub fn from_failure_body(status: StatusCode, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|msg| !msg.is_empty())
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string();

        ClientError::Api { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
