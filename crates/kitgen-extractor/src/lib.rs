//! Kitgen Extractor
//!
//! Finds the contract in a client folder, pulls the contractor clause out of
//! it and turns that clause into the fields of the client's document kit.
//!
//! # Overview
//!
//! A client folder holds a few dozen loosely named files: contracts, signed
//! and scanned copies, reports, labor records. The extractor decides which of
//! them play which role using declarative rule tables, extracts the text
//! between anchor patterns from the best candidate and hands that text to a
//! language model for field extraction.
//!
//! # Architecture
//!
//! ```text
//! Storage → FolderIndex → FileClassifier → Deduplicator
//!                       → SegmentExtractor → QualificationExtractor → TemplateEditor
//! ```
//!
//! Storage, the language model and the template editor are traits from
//! `kitgen-domain`; classification and extraction are synchronous and run on
//! the caller's task once the folder content has been downloaded.
//!
//! # Key Features
//!
//! - **Rule tiers**: the first rule of a role that matches anything wins
//! - **Lazy text extraction**: only files surviving the name filters are read
//! - **Staged anchor search**: a strict pass over clean copies, then a
//!   lenient pass admitting signed copies
//! - **Copy detection**: "Cópia de" duplicates collapse to the first file
//!
//! # Example Usage
//!
//! ```no_run
//! use kitgen_extractor::{DocumentTextExtractor, ExtractorConfig, FolderIndex};
//! use kitgen_domain::traits::StorageProvider;
//!
//! # async fn example<S>(storage: S) -> Result<(), Box<dyn std::error::Error>>
//! # where S: StorageProvider, S::Error: std::fmt::Display {
//! let config = ExtractorConfig::default();
//! let text = DocumentTextExtractor::new();
//!
//! let mut index = FolderIndex::new("1AbC", &storage, &text, &config);
//! let contracts = index.get_file("Contrato").await?;
//!
//! for file in &contracts {
//!     println!("{}", file);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod dedup;
mod error;
mod fields;
mod folder;
mod normalize;
mod parser;
mod pipeline;
mod prompt;
mod rules;
mod segment;
mod text;
mod types;


pub use classifier::FileClassifier;
pub use config::{
    default_anchors, ExtractionStage, ExtractorConfig, TemplateFields, CONTRACT_ROLE,
    DEFAULT_COPY_PREFIX, DEFAULT_MEDIA_EXCLUDE_PATTERN, DEFAULT_RELEVANCE_PATTERN,
};
pub use dedup::Deduplicator;
pub use error::KitError;
pub use fields::QualificationExtractor;
pub use folder::FolderIndex;
pub use normalize::{edit_distance, fuzzy_match, normalize};
pub use pipeline::{parse_folder_link, FolderScanner, KitPipeline};
pub use rules::default_roles;
pub use segment::{ExtractedSegment, SegmentExtractor};
pub use text::DocumentTextExtractor;
pub use types::{FileSummary, KitOutcome, RoleMatches};
