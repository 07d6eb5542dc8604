//! Application layer errors

use serde_json::Value;
use thiserror::Error;

/// Failure of a remote call.
///
/// `Clone` so every requester coalesced onto one fetch receives the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never reached the server or never came back
    #[error("Network error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Request failed with status {status}")]
    Response { status: u16, data: Value },

    /// Response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Messages carried in `response.data.message`.
    ///
    /// A list yields one entry per element, blank ones included, so each
    /// still gets a notification. A scalar yields one entry. Missing, null
    /// or blank scalar messages yield nothing; callers pick a fallback.
    pub fn messages(&self) -> Vec<String> {
        let ApiError::Response { data, .. } = self else {
            return Vec::new();
        };

        match data.get("message") {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                let text = value_text(other);
                if text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![text]
                }
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Render a JSON value as notification text: strings verbatim, the rest as JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Top-level errors surfaced by the CLI
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing parameter: {0}")]
    MissingParam(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
