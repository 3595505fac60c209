//! Results returned by the pipeline

use kitgen_domain::FileDescriptor;
use serde::{Deserialize, Serialize};

/// A generated kit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitOutcome {
    /// Full name of the client the kit was generated for
    pub client_name: String,

    /// Identifier of the generated document
    pub document_id: String,

    /// Link to open the generated document
    pub link: String,
}

/// Identifying fields of a file, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Storage identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// MIME type
    pub mime_type: String,
}

impl From<&FileDescriptor> for FileSummary {
    fn from(file: &FileDescriptor) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        }
    }
}

/// Files found for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMatches {
    /// Role name
    pub role: String,

    /// Whether the role must match at least one file
    pub required: bool,

    /// Matching files after deduplication
    pub files: Vec<FileSummary>,
}

impl RoleMatches {
    /// Whether a required role came back empty
    pub fn is_missing(&self) -> bool {
        self.required && self.files.is_empty()
    }
}
