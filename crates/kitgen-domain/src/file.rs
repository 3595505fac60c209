//! File module - one entry of a client folder

use std::fmt;

/// MIME type the storage provider uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// A file found in a client folder
///
/// Created when the folder is listed. The byte content is only present after
/// the batch download step; classification and segment extraction read it
/// through a [`TextExtractor`](crate::traits::TextExtractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Storage identifier
    pub id: String,

    /// Display name (never empty)
    pub name: String,

    /// Identifiers of the enclosing folder(s)
    pub parents: Vec<String>,

    /// MIME type reported by storage
    pub mime_type: String,

    /// Raw bytes, populated by the batch download
    pub content: Option<Vec<u8>>,
}

impl FileDescriptor {
    /// Create a descriptor without content
    ///
    /// # Errors
    /// Returns error if the name is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use kitgen_domain::FileDescriptor;
    ///
    /// let file = FileDescriptor::new("1a2b", "Contrato.pdf", vec!["f0".into()], "application/pdf").unwrap();
    /// assert!(!file.has_content());
    /// assert!(FileDescriptor::new("1a2b", "", vec![], "application/pdf").is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parents: Vec<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.is_empty() {
            return Err("File name cannot be empty".to_string());
        }

        Ok(Self {
            id: id.into(),
            name,
            parents,
            mime_type: mime_type.into(),
            content: None,
        })
    }

    /// Attach downloaded bytes
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = Some(content);
        self
    }

    /// Whether the batch download populated this file
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Bytes of the file, empty when not downloaded
    pub fn bytes(&self) -> &[u8] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Whether this entry is a folder rather than a document
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let result = FileDescriptor::new("id", "", vec![], "application/pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_content_lifecycle() {
        let file = FileDescriptor::new("id", "Kit.pdf", vec!["parent".to_string()], "application/pdf")
            .unwrap();
        assert!(!file.has_content());
        assert!(file.bytes().is_empty());

        let file = file.with_content(b"%PDF".to_vec());
        assert!(file.has_content());
        assert_eq!(file.bytes(), b"%PDF");
    }

    #[test]
    fn test_folder_detection() {
        let folder = FileDescriptor::new("id", "Docs", vec![], FOLDER_MIME_TYPE).unwrap();
        assert!(folder.is_folder());
    }

    #[test]
    fn test_display() {
        let file = FileDescriptor::new("abc", "Kit.pdf", vec![], "application/pdf").unwrap();
        assert_eq!(file.to_string(), "Kit.pdf (abc)");
    }
}
