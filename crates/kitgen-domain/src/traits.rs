//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and the
//! services it consumes. Infrastructure implementations live in other crates;
//! tests use in-memory fakes.

use crate::listing::{ListingQuery, SearchResponse};
use async_trait::async_trait;

/// Trait for folder listing and content download
///
/// Implemented by the infrastructure layer (kitgen-drive)
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Error type for storage operations
    type Error: Send;

    /// List the direct children of a folder
    ///
    /// Returns `files: None` when the folder does not exist.
    async fn search(&self, query: &ListingQuery) -> Result<SearchResponse, Self::Error>;

    /// Download the bytes of every id, in input order
    ///
    /// A failure for any id fails the whole batch.
    async fn batch_download(&self, file_ids: &[String]) -> Result<Vec<Vec<u8>>, Self::Error>;
}

/// Trait for turning document bytes into text
///
/// Implementations never fail: unreadable input yields an empty string.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of at most `max_pages` pages
    fn extract_text(&self, content: &[u8], mime_type: &str, max_pages: usize) -> String;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (kitgen-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: Send;

    /// Generate text completion
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion constrained to a JSON object (if supported)
    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for producing the output document from the template
///
/// Implemented by the infrastructure layer (kitgen-drive)
#[async_trait]
pub trait TemplateEditor: Send + Sync {
    /// Error type for template operations
    type Error: Send;

    /// Copy the template into `destination_folder_id`, replace every
    /// placeholder with its value and return the new document id
    async fn render(
        &self,
        destination_folder_id: &str,
        replacements: &[(String, String)],
    ) -> Result<String, Self::Error>;
}
