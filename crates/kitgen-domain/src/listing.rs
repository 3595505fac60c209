//! Folder listing records exchanged with the storage provider

use crate::file::FileDescriptor;
use serde::{Deserialize, Serialize};

/// Which kind of children a listing asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Non-folder, non-trashed entries
    Files,
    /// Sub-folders only
    Folders,
}

/// A listing request for the direct children of one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Folder whose children are listed
    pub parent_id: String,

    /// Kind of children
    pub kind: EntryKind,
}

impl ListingQuery {
    /// List the files of a folder
    pub fn files_in(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            kind: EntryKind::Files,
        }
    }

    /// List the sub-folders of a folder
    pub fn folders_in(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            kind: EntryKind::Folders,
        }
    }
}

/// One entry of a listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    /// Storage identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Parent folder identifiers
    #[serde(default)]
    pub parents: Vec<String>,

    /// MIME type
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
}

impl StorageEntry {
    /// Convert into a content-less descriptor
    ///
    /// Entries reported without parents are attributed to `folder_id`.
    pub fn to_descriptor(&self, folder_id: &str) -> Result<FileDescriptor, String> {
        let parents = if self.parents.is_empty() {
            vec![folder_id.to_string()]
        } else {
            self.parents.clone()
        };
        FileDescriptor::new(self.id.clone(), self.name.clone(), parents, self.mime_type.clone())
    }
}

/// Listing response
///
/// `files: None` means the folder was not found (or is not accessible), which
/// is distinct from `Some(vec![])`, an existing empty folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Entries, absent when the folder is unknown
    #[serde(default)]
    pub files: Option<Vec<StorageEntry>>,
}

impl SearchResponse {
    /// Response for an existing folder
    pub fn found(files: Vec<StorageEntry>) -> Self {
        Self { files: Some(files) }
    }

    /// Response for a missing folder
    pub fn not_found() -> Self {
        Self { files: None }
    }
}
