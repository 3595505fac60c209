//! Rule-based file classification
//!
//! Rules for a role are tiers: the first rule selecting at least one file wins
//! and the remaining rules are never evaluated.

use crate::error::KitError;
use crate::normalize::normalize;
use crate::rules::CompiledRule;
use kitgen_domain::traits::TextExtractor;
use kitgen_domain::{ClassificationRule, FileDescriptor};
use tracing::{debug, info};

/// Selects the files of a folder matching a role's rules
pub struct FileClassifier<'a, T: TextExtractor + ?Sized> {
    text_extractor: &'a T,
    pages: usize,
}

impl<'a, T: TextExtractor + ?Sized> FileClassifier<'a, T> {
    /// Create a classifier reading `pages` pages when a rule filters on text
    pub fn new(text_extractor: &'a T, pages: usize) -> Self {
        Self {
            text_extractor,
            pages,
        }
    }

    /// Return the files selected by the first rule with any match
    ///
    /// Text is only extracted for files that survive the name filters of a rule
    /// that declares text filters. An empty result is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `KitError::Config` if a pattern does not compile
    pub fn classify(
        &self,
        files: &[FileDescriptor],
        rules: &[ClassificationRule],
    ) -> Result<Vec<FileDescriptor>, KitError> {
        let normalized: Vec<String> = files.iter().map(|f| normalize(&f.name)).collect();

        for (idx, rule) in rules.iter().enumerate() {
            debug!("Applying rule {}/{}", idx + 1, rules.len());
            let compiled = CompiledRule::compile(rule)?;

            let mut selected = Vec::new();
            for (file, name) in files.iter().zip(&normalized) {
                if !compiled.matches_name(name) {
                    continue;
                }

                if !compiled.has_text_filters() {
                    debug!("'{}' matches name rules", file.name);
                    selected.push(file.clone());
                    continue;
                }

                info!("Analyzing file: {}", file.name);
                let text = self
                    .text_extractor
                    .extract_text(file.bytes(), &file.mime_type, self.pages)
                    .to_lowercase();
                if compiled.matches_text(&text) {
                    debug!("'{}' matches content rules", file.name);
                    selected.push(file.clone());
                }
            }

            if !selected.is_empty() {
                debug!("Rule {} selected {} file(s)", idx + 1, selected.len());
                return Ok(selected);
            }
        }

        Ok(Vec::new())
    }
}
