//! Anchor-bounded segment extraction
//!
//! Extraction runs as an ordered list of stages. Each stage has its own
//! eligibility filter; within a stage every anchor pair is tried against every
//! eligible file, in listing order, and the first hit ends the search.
//!
//! The end anchor is searched only after the start anchor's match, so a
//! segment never has negative length.

use crate::config::ExtractionStage;
use crate::error::KitError;
use crate::normalize::normalize;
use crate::rules::compile_name_patterns;
use kitgen_domain::traits::TextExtractor;
use kitgen_domain::{AnchorPair, FileDescriptor};
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Text found between an anchor pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSegment {
    /// Text strictly between the two anchor matches
    pub text: String,

    /// File the text was taken from
    pub source: FileDescriptor,

    /// Index of the anchor pair that matched
    pub anchor_index: usize,

    /// Name of the stage that produced the match
    pub stage: String,
}

/// Searches files for the first anchor-bounded segment
pub struct SegmentExtractor<'a, T: TextExtractor + ?Sized> {
    text_extractor: &'a T,
    pages: usize,
    stages: &'a [ExtractionStage],
}

struct CompiledAnchor {
    start: Regex,
    end: Regex,
}

impl<'a, T: TextExtractor + ?Sized> SegmentExtractor<'a, T> {
    /// Create an extractor reading up to `pages` pages per file
    pub fn new(text_extractor: &'a T, pages: usize, stages: &'a [ExtractionStage]) -> Self {
        Self {
            text_extractor,
            pages,
            stages,
        }
    }

    /// Find the segment for the first anchor pair matching any eligible file
    ///
    /// # Errors
    ///
    /// - `KitError::NoMatchFound` when every stage is exhausted, carrying the
    ///   names of the files that were read
    /// - `KitError::Config` if a pattern does not compile
    pub fn extract_segment(
        &self,
        files: &[FileDescriptor],
        anchors: &[AnchorPair],
    ) -> Result<ExtractedSegment, KitError> {
        let compiled = anchors
            .iter()
            .map(|pair| {
                Ok(CompiledAnchor {
                    start: Regex::new(&pair.start)?,
                    end: Regex::new(&pair.end)?,
                })
            })
            .collect::<Result<Vec<_>, KitError>>()?;

        let normalized: Vec<String> = files.iter().map(|f| normalize(&f.name)).collect();
        let mut texts: HashMap<usize, String> = HashMap::new();
        let mut attempted: Vec<String> = Vec::new();

        for stage in self.stages {
            debug!("Extraction stage '{}'", stage.name);
            let excluded = compile_name_patterns(&stage.excluded_names)?;
            let eligible: Vec<usize> = (0..files.len())
                .filter(|&i| !excluded.iter().any(|p| p.is_match(&normalized[i])))
                .collect();

            if eligible.is_empty() {
                debug!("No eligible files in stage '{}'", stage.name);
                continue;
            }

            for (anchor_index, anchor) in compiled.iter().enumerate() {
                for &i in &eligible {
                    let file = &files[i];
                    let text = texts.entry(i).or_insert_with(|| {
                        info!("Analyzing file: {}", file.name);
                        self.text_extractor
                            .extract_text(file.bytes(), &file.mime_type, self.pages)
                    });
                    if !attempted.contains(&file.name) {
                        attempted.push(file.name.clone());
                    }

                    if !has_word(text) {
                        debug!("'{}' has no readable text", file.name);
                        continue;
                    }

                    if stage.require_both_anchors
                        && !(anchor.start.is_match(text) && anchor.end.is_match(text))
                    {
                        debug!("Anchors {} not found in '{}'", anchor_index + 1, file.name);
                        continue;
                    }

                    if let Some(segment) = slice_between(text, anchor) {
                        info!(
                            "Segment found in '{}' ({} chars, anchors {}, stage '{}')",
                            file.name,
                            segment.len(),
                            anchor_index + 1,
                            stage.name
                        );
                        return Ok(ExtractedSegment {
                            text: segment.to_string(),
                            source: file.clone(),
                            anchor_index,
                            stage: stage.name.clone(),
                        });
                    }
                    debug!("Anchors {} not found in '{}'", anchor_index + 1, file.name);
                }
            }
        }

        warn!("No readable contract segment found");
        Err(KitError::NoMatchFound { attempted })
    }
}

/// Text between the first start match and the first end match after it
fn slice_between<'t>(text: &'t str, anchor: &CompiledAnchor) -> Option<&'t str> {
    let start = anchor.start.find(text)?;
    let end = anchor.end.find_at(text, start.end())?;
    Some(&text[start.end()..end.start()])
}

fn has_word(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}
