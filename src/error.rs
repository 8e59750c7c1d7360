use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the task service or running the UI.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Transport failure (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The response body was not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base address is not a valid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unknown status '{0}'. Supported: pending, in progress, completed, overdue.")]
    InvalidStatus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Builds an [`TaskError::Api`] from a status code and the response body.
    ///
    /// An empty body falls back to the canonical reason phrase.
    pub fn api_error(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("no reason given").to_string()
        } else {
            body.to_string()
        };
        TaskError::Api { status, message }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
