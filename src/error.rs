//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// Response body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Client-side validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create a decode error with message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status of a server-reported error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 answer, which the attendance history treats as
    /// "no records yet" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message to show the user: the server-supplied `detail` when present,
    /// otherwise the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api {
                detail: Some(detail), ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = ApiError::Api {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message("Failed to add employee"), "Email already registered");
    }

    #[test]
    fn test_user_message_falls_back_without_detail() {
        let err = ApiError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message("Failed to add employee"), "Failed to add employee");
    }

    #[test]
    fn test_is_not_found() {
        let not_found = ApiError::Api {
            status: 404,
            detail: Some("Employee not found".to_string()),
        };
        let bad_request = ApiError::Api {
            status: 400,
            detail: None,
        };

        assert!(not_found.is_not_found());
        assert!(!bad_request.is_not_found());
        assert!(!ApiError::validation("x").is_not_found());
    }
}
