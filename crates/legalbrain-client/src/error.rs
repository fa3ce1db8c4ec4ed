use legalbrain_core::error::CoreError;
use legalbrain_sync::error::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response. `message` comes from the response body.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } => RemoteError::with_status(status, message),
            ClientError::Http(e) => {
                let status = e.status().map(|s| s.as_u16());
                RemoteError {
                    status,
                    message: format!("HTTP request failed: {e}"),
                }
            }
            other => RemoteError::new(other.to_string()),
        }
    }
}

/// Turn an error response body into a display message.
///
/// FastAPI style `{"detail": "..."}` bodies yield the detail string; any
/// other non-empty body is used as-is. An empty body yields `fallback`.
pub fn message_from_body(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed)
        && let Some(serde_json::Value::String(detail)) = map.get("detail")
        && !detail.trim().is_empty()
    {
        return detail.trim().to_string();
    }

    trimmed.to_string()
}
