//! Document text extraction
//!
//! Classification and segment extraction only ever look at the first pages of
//! a document, so every extractor takes a page limit. Unreadable input yields
//! an empty string; callers treat that as "no text".

use kitgen_domain::traits::TextExtractor;
use tracing::{debug, warn};

/// Page separator used by plain-text exports
const FORM_FEED: char = '\x0c';

/// Extracts text from the document types found in client folders
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    /// Create an extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, content: &[u8], mime_type: &str, max_pages: usize) -> String {
        if content.is_empty() || max_pages == 0 {
            return String::new();
        }

        match mime_type {
            "application/pdf" => extract_pdf(content, max_pages),

            t if t.starts_with("text/") || t == "application/json" || t == "application/xml" => {
                first_pages(&String::from_utf8_lossy(content), max_pages)
            }

            t if t.starts_with("image/") || t.starts_with("audio/") || t.starts_with("video/") => {
                debug!("No text layer for {}", t);
                String::new()
            }

            _ => match std::str::from_utf8(content) {
                Ok(text) => first_pages(text, max_pages),
                Err(_) => String::new(),
            },
        }
    }
}

fn first_pages(text: &str, max_pages: usize) -> String {
    text.split(FORM_FEED).take(max_pages).collect::<Vec<_>>().join("")
}

#[cfg(feature = "pdf")]
fn extract_pdf(content: &[u8], max_pages: usize) -> String {
    // The PDF parser panics on some malformed inputs
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(content));

    match result {
        Ok(Ok(pages)) => pages.into_iter().take(max_pages).collect::<Vec<_>>().join(""),
        Ok(Err(e)) => {
            warn!("Failed to read PDF: {}", e);
            String::new()
        }
        Err(_) => {
            warn!("PDF parser aborted on malformed input");
            String::new()
        }
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_content: &[u8], _max_pages: usize) -> String {
    debug!("PDF support disabled, skipping");
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_pages() {
        let extractor = DocumentTextExtractor::new();
        let content = "page one\x0cpage two\x0cpage three".as_bytes();

        assert_eq!(extractor.extract_text(content, "text/plain", 1), "page one");
        assert_eq!(extractor.extract_text(content, "text/plain", 2), "page onepage two");
        assert_eq!(
            extractor.extract_text(content, "text/plain", 10),
            "page onepage twopage three"
        );
    }

    #[test]
    fn test_media_yields_nothing() {
        let extractor = DocumentTextExtractor::new();
        assert_eq!(extractor.extract_text(b"\x00\x01", "video/mp4", 4), "");
        assert_eq!(extractor.extract_text(b"abc", "image/png", 4), "");
    }

    #[test]
    fn test_unknown_binary_yields_nothing() {
        let extractor = DocumentTextExtractor::new();
        assert_eq!(
            extractor.extract_text(&[0xff, 0xfe, 0x00], "application/octet-stream", 4),
            ""
        );
        assert_eq!(
            extractor.extract_text(b"CONTRATANTE", "application/octet-stream", 4),
            "CONTRATANTE"
        );
    }

    #[test]
    fn test_empty_content_or_zero_pages() {
        let extractor = DocumentTextExtractor::new();
        assert_eq!(extractor.extract_text(b"", "text/plain", 4), "");
        assert_eq!(extractor.extract_text(b"abc", "text/plain", 0), "");
    }

    #[test]
    fn test_malformed_pdf_yields_nothing() {
        let extractor = DocumentTextExtractor::new();
        assert_eq!(extractor.extract_text(b"not a pdf", "application/pdf", 4), "");
    }
}
