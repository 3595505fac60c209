//! Error types for the Drive and Docs collaborators.

use thiserror::Error;

/// Drive and Docs operation errors
#[derive(Debug, Error)]
pub enum DriveError {
    /// Connection error (network, DNS, TLS)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error body or reason
        message: String,
    },

    /// File or template does not exist or is not shared with the session
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing, unreadable or rejected
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The API answered with an unexpected body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for DriveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            DriveError::ConnectionError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                    DriveError::AuthError(format!("HTTP {}", status))
                }
                Some(status) => DriveError::Status {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => DriveError::ConnectionError(e.to_string()),
            }
        } else if e.is_decode() {
            DriveError::InvalidResponse(e.to_string())
        } else {
            DriveError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for DriveError {
    fn from(e: serde_json::Error) -> Self {
        DriveError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

impl From<std::io::Error> for DriveError {
    fn from(e: std::io::Error) -> Self {
        DriveError::AuthError(format!("Cannot read token file: {}", e))
    }
}
