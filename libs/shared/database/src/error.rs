use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppwriteError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Appwrite id rules: at most 36 chars of `[A-Za-z0-9._-]`, not starting
/// with a special char.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }

    id.len() <= 36
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Error body returned by Appwrite for non-2xx responses.
#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl AppwriteError {
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<AppwriteErrorBody>(body) {
            Ok(parsed) => match parsed.kind {
                Some(kind) => format!("{} ({})", parsed.message, kind),
                None => parsed.message,
            },
            Err(_) => body.to_string(),
        };

        match status.as_u16() {
            401 | 403 => AppwriteError::Unauthorized(message),
            404 => AppwriteError::NotFound(message),
            _ => AppwriteError::Api { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppwriteError::NotFound(_))
    }
}
