//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur while discovering, extracting and filling a kit
///
/// `Display` carries the internal diagnostic; [`KitError::user_message`] is the
/// stable sentence shown to the person running the pipeline.
#[derive(Error, Debug)]
pub enum KitError {
    /// Storage reported no listing for the folder
    #[error("Folder not found: {folder_id}")]
    FolderNotFound {
        /// Requested folder id
        folder_id: String,
    },

    /// A required role matched no file
    #[error("No file matched required role '{role}'")]
    RequiredFileNotFound {
        /// Role name
        role: String,
    },

    /// No anchor pair matched in any eligible file
    #[error("No anchor pair matched in {} file(s): {}", attempted.len(), attempted.join(", "))]
    NoMatchFound {
        /// Names of the files that were examined
        attempted: Vec<String>,
    },

    /// Field extraction returned missing or empty fields
    #[error("Incomplete extracted data: {0}")]
    IncompleteExtractedData(String),

    /// The language model reply could not be interpreted
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    /// Role name not present in the rule table
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Folder link is empty or has no id
    #[error("Invalid folder link: '{0}'")]
    InvalidFolderLink(String),

    /// Storage, LLM or template transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error (bad pattern, missing section)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KitError {
    /// Stable, user-facing description of the failure
    pub fn user_message(&self) -> &'static str {
        match self {
            KitError::FolderNotFound { .. } => {
                "Folder not found. Check that the link is correct and that you have access to it."
            }
            KitError::RequiredFileNotFound { .. } => {
                "No contract was found in the client folder. Check that a valid contract file exists."
            }
            KitError::NoMatchFound { .. } => {
                "No readable contract was found. Check that the files contain the CONTRATANTE and CLÁUSULA sections."
            }
            KitError::IncompleteExtractedData(_) => {
                "The client data is incomplete. Check that the contract contains the name and qualification."
            }
            KitError::InvalidResponse(_) => {
                "The contract could not be processed (unexpected response format). Try again."
            }
            KitError::InvalidRole(_) => {
                "Error while searching the folder files. Check that the folder contains the required documents."
            }
            KitError::InvalidFolderLink(_) => {
                "The folder link is empty. Please provide a valid link."
            }
            KitError::Transport(_) => {
                "Could not reach an external service. Check your connection and try again."
            }
            KitError::Config(_) => {
                "The application is misconfigured. Contact technical support."
            }
        }
    }
}

impl From<regex::Error> for KitError {
    fn from(e: regex::Error) -> Self {
        KitError::Config(format!("Invalid pattern: {}", e))
    }
}

impl From<serde_json::Error> for KitError {
    fn from(e: serde_json::Error) -> Self {
        KitError::InvalidResponse(e.to_string())
    }
}
