//! Access token ownership for Drive and Docs calls.

use crate::error::DriveError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Drive v3 REST base URL
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Docs v1 REST base URL
pub const DOCS_API_BASE: &str = "https://docs.googleapis.com/v1";

/// Token file written by the OAuth consent flow
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(alias = "access_token")]
    token: String,
}

/// An authenticated session
///
/// Owns the access token and the HTTP connection pool. Clients borrow the
/// session, so its lifetime bounds every call made with it.
#[derive(Debug, Clone)]
pub struct DriveSession {
    token: String,
    http: reqwest::Client,
    drive_base: String,
    docs_base: String,
}

impl DriveSession {
    /// Create a session from an access token
    pub fn new(token: impl Into<String>) -> Result<Self, DriveError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(DriveError::AuthError("Access token is empty".to_string()));
        }

        Ok(Self {
            token,
            http: reqwest::Client::new(),
            drive_base: DRIVE_API_BASE.to_string(),
            docs_base: DOCS_API_BASE.to_string(),
        })
    }

    /// Create a session from a token JSON file (`token` or `access_token` key)
    pub fn from_token_file(path: impl AsRef<Path>) -> Result<Self, DriveError> {
        let path = path.as_ref();
        debug!("Reading access token from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        let file: TokenFile = serde_json::from_str(&contents)
            .map_err(|e| DriveError::AuthError(format!("Invalid token file: {}", e)))?;
        Self::new(file.token)
    }

    /// Point the session at other API endpoints
    pub fn with_base_urls(mut self, drive_base: &str, docs_base: &str) -> Self {
        self.drive_base = drive_base.trim_end_matches('/').to_string();
        self.docs_base = docs_base.trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn drive_url(&self, path: &str) -> String {
        format!("{}/{}", self.drive_base, path.trim_start_matches('/'))
    }

    pub(crate) fn docs_url(&self, path: &str) -> String {
        format!("{}/{}", self.docs_base, path.trim_start_matches('/'))
    }
}
