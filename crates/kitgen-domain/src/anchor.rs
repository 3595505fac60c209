//! Anchor pairs bounding the text segment handed to field extraction

use serde::{Deserialize, Serialize};

/// A (start, end) regex pattern pair
///
/// Pairs are evaluated in priority order; the first pair whose anchors are both
/// found in a document wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPair {
    /// Pattern marking the beginning of the segment (exclusive)
    pub start: String,

    /// Pattern marking the end of the segment (exclusive)
    pub end: String,
}

impl AnchorPair {
    /// Create a new anchor pair
    ///
    /// # Errors
    /// Returns error if either pattern is empty
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, String> {
        let pair = Self {
            start: start.into(),
            end: end.into(),
        };
        pair.validate()?;
        Ok(pair)
    }

    /// Check that both patterns are non-empty
    pub fn validate(&self) -> Result<(), String> {
        if self.start.is_empty() {
            return Err("Anchor start pattern cannot be empty".to_string());
        }
        if self.end.is_empty() {
            return Err("Anchor end pattern cannot be empty".to_string());
        }
        Ok(())
    }
}
