//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response could not be read as expected
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 401
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// 403
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400 / 422
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// A call that needs an identity was made without one
    #[error("Not logged in")]
    NotLoggedIn,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a non-success status and its body text
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized(body),
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            400 | 422 => Self::Validation(body),
            _ => Self::Status { status, body },
        }
    }

    /// HTTP status behind this error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `message` from a JSON error body, when the backend sent one
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            Self::Unauthorized(b) | Self::Forbidden(b) | Self::NotFound(b) | Self::Validation(b) => b,
            Self::Status { body, .. } => body,
            _ => return None,
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ClientError::from_status(401, String::new()), ClientError::Unauthorized(_)));
        assert!(matches!(ClientError::from_status(403, String::new()), ClientError::Forbidden(_)));
        assert!(matches!(ClientError::from_status(404, String::new()), ClientError::NotFound(_)));
        assert!(matches!(ClientError::from_status(400, String::new()), ClientError::Validation(_)));
        assert!(matches!(ClientError::from_status(422, String::new()), ClientError::Validation(_)));
        let err = ClientError::from_status(503, "down".into());
        assert!(matches!(err, ClientError::Status { status: 503, .. }));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Request failed with status 503: down");
    }

    #[test]
    fn test_server_message() {
        let err = ClientError::from_status(400, r#"{"message":"Email already exists"}"#.into());
        assert_eq!(err.server_message().as_deref(), Some("Email already exists"));
        assert!(ClientError::from_status(500, "oops".into()).server_message().is_none());
        assert!(ClientError::NotLoggedIn.server_message().is_none());
    }
}
