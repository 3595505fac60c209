//! Duplicate file removal
//!
//! Storage names a duplicated file "Cópia de <original>". Two files are the
//! same document when their names match once that prefix is removed.

use crate::normalize::fuzzy_match;
use kitgen_domain::FileDescriptor;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Removes copies of files already present in a listing
#[derive(Debug, Clone)]
pub struct Deduplicator {
    copy_prefix: String,
    case_sensitive: bool,
    max_distance: Option<usize>,
}

impl Deduplicator {
    /// Create a deduplicator ignoring `copy_prefix`, compared case-sensitively
    pub fn new(copy_prefix: impl Into<String>) -> Self {
        Self {
            copy_prefix: copy_prefix.into(),
            case_sensitive: true,
            max_distance: None,
        }
    }

    /// Compare prefix and names ignoring case
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Treat names within `max_distance` edits (after normalization) as the same
    pub fn with_max_distance(mut self, max_distance: Option<usize>) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Comparison key: the name without any leading copy prefix
    ///
    /// Name and prefix are composed to NFC first, and surrounding whitespace
    /// is not part of the key.
    pub fn key(&self, name: &str) -> String {
        let name: String = name.nfc().collect();
        let prefix: String = self.copy_prefix.nfc().collect();
        let (mut rest, prefix) = if self.case_sensitive {
            (name, prefix)
        } else {
            (name.to_lowercase(), prefix.to_lowercase())
        };

        if prefix.is_empty() {
            return rest.trim().to_string();
        }
        loop {
            let trimmed = rest.trim_start();
            match trimmed.strip_prefix(prefix.as_str()) {
                Some(stripped) => rest = stripped.to_string(),
                None => return trimmed.trim_end().to_string(),
            }
        }
    }

    /// Keep the first file of every group of duplicates, preserving order
    pub fn deduplicate(&self, files: Vec<FileDescriptor>) -> Vec<FileDescriptor> {
        let mut kept: Vec<(String, FileDescriptor)> = Vec::with_capacity(files.len());

        for file in files {
            let key = self.key(&file.name);
            if kept.iter().any(|(seen, _)| self.same(seen, &key)) {
                debug!("Skipping duplicate '{}'", file.name);
                continue;
            }
            kept.push((key, file));
        }

        kept.into_iter().map(|(_, file)| file).collect()
    }

    fn same(&self, a: &str, b: &str) -> bool {
        match self.max_distance {
            Some(max) => fuzzy_match(a, b, max),
            None => a == b,
        }
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COPY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, name: &str) -> FileDescriptor {
        FileDescriptor::new(id, name, vec![], "application/pdf").unwrap()
    }

    fn ids(files: &[FileDescriptor]) -> Vec<&str> {
        files.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_copy_is_dropped() {
        let dedup = Deduplicator::default();
        let files = vec![file("1", "Relatório.pdf"), file("2", "Cópia de Relatório.pdf")];

        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let dedup = Deduplicator::default();
        let files = vec![
            file("1", "Cópia de Contrato.pdf"),
            file("2", "CNIS.pdf"),
            file("3", "Contrato.pdf"),
        ];

        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1", "2"]);
    }

    #[test]
    fn test_repeated_prefix() {
        let dedup = Deduplicator::default();
        assert_eq!(dedup.key("Cópia de Cópia de Kit.pdf"), "Kit.pdf");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let dedup = Deduplicator::default();
        assert_eq!(dedup.key("  Kit.pdf "), "Kit.pdf");

        let files = vec![file("1", "Kit.pdf"), file("2", "Cópia de  Kit.pdf "), file("3", "Kit .pdf")];
        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1", "3"]);
    }

    #[test]
    fn test_decomposed_names_match_composed() {
        let dedup = Deduplicator::default();
        let files = vec![
            file("1", "Relatório.pdf"),
            file("2", "Co\u{301}pia de Relato\u{301}rio.pdf"),
            file("3", "Co\u{301}pia de Relatório.pdf"),
        ];

        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1"]);
        assert_eq!(dedup.key("Co\u{301}pia de Kit.pdf"), "Kit.pdf");
    }

    #[test]
    fn test_distinct_names_kept() {
        let dedup = Deduplicator::default();
        let files = vec![file("1", "Contrato.pdf"), file("2", "Contrato assinado.pdf")];

        assert_eq!(dedup.deduplicate(files).len(), 2);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let dedup = Deduplicator::default();
        let files = vec![file("1", "Kit.pdf"), file("2", "cópia de Kit.pdf")];
        assert_eq!(dedup.deduplicate(files).len(), 2);

        let dedup = Deduplicator::default().case_insensitive();
        let files = vec![file("1", "Kit.pdf"), file("2", "cópia de KIT.pdf")];
        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1"]);
    }

    #[test]
    fn test_fuzzy_mode() {
        let dedup = Deduplicator::default().with_max_distance(Some(1));
        let files = vec![file("1", "Relatorio final.pdf"), file("2", "Cópia de Relatório fnal.pdf")];

        assert_eq!(ids(&dedup.deduplicate(files)), vec!["1"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Deduplicator::default().deduplicate(vec![]).is_empty());
    }
}
