//! Kitgen Domain Layer
//!
//! This crate contains the data model shared by every other Kitgen crate and
//! the trait interfaces for the external collaborators the extraction core
//! consumes. It performs no I/O.
//!
//! ## Key Concepts
//!
//! - **FileDescriptor**: one file of a client folder, optionally carrying its bytes
//! - **Role**: a semantic file category ("Contrato") backed by an ordered rule list
//! - **ClassificationRule**: name/text pattern sets deciding role membership
//! - **AnchorPair**: a (start, end) pattern pair bounding the segment of interest
//! - **ClientData**: the fields the language model returns for the template
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in `kitgen-drive` and `kitgen-llm`
//! - The extraction core lives in `kitgen-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anchor;
pub mod client;
pub mod file;
pub mod listing;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use anchor::AnchorPair;
pub use client::ClientData;
pub use file::{FileDescriptor, FOLDER_MIME_TYPE};
pub use listing::{EntryKind, ListingQuery, SearchResponse, StorageEntry};
pub use rule::{ClassificationRule, RoleDefinition};
