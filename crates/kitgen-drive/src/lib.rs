//! Kitgen Drive collaborators
//!
//! Storage and template implementations over the Google Drive v3 and Docs v1
//! REST APIs.
//!
//! # Example
//!
//! ```no_run
//! use kitgen_domain::traits::StorageProvider;
//! use kitgen_domain::ListingQuery;
//! use kitgen_drive::{DriveClient, DriveSession};
//!
//! # async fn example() -> Result<(), kitgen_drive::DriveError> {
//! let session = DriveSession::from_token_file("token.json")?;
//! let client = DriveClient::new(&session);
//!
//! let listing = client.search(&ListingQuery::files_in("1AbC")).await?;
//! println!("{} file(s)", listing.files.map(|f| f.len()).unwrap_or(0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod editor;
mod error;
mod session;

pub use client::{build_query, DriveClient, PAGE_SIZE};
pub use editor::{DocsTemplateEditor, DEFAULT_DOCUMENT_NAME, DOCUMENT_MIME_TYPE};
pub use error::DriveError;
pub use session::{DriveSession, DOCS_API_BASE, DRIVE_API_BASE};
