//! Configuration for the extraction pipeline

use crate::rules::default_roles;
use kitgen_domain::{AnchorPair, RoleDefinition};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Keywords marking a file as worth downloading (matched on the normalized name)
pub const DEFAULT_RELEVANCE_PATTERN: &str = r"entrevista|relatorio|relatoiro|relatorio( do)? (acidente|acidental)|resumo_dos_fatos-\d{8,10}\.pdf|questionario|contrato|contratos|kit|assinar|cliente|prestacao de servicos|ctps|carteira de trabalho|cnis|extrato";

/// MIME types never downloaded
pub const DEFAULT_MEDIA_EXCLUDE_PATTERN: &str = r"video|audio";

/// Name prefix storage adds to duplicated files
pub const DEFAULT_COPY_PREFIX: &str = "Cópia de";

/// Role whose segment feeds field extraction
pub const CONTRACT_ROLE: &str = "Contrato";

/// One pass of segment extraction
///
/// Files whose normalized name matches any `excluded_names` pattern are not
/// considered in this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStage {
    /// Label used in logs
    pub name: String,

    /// Name patterns making a file ineligible
    #[serde(default)]
    pub excluded_names: Vec<String>,

    /// Check both anchors before slicing (same result, checked up front)
    #[serde(default)]
    pub require_both_anchors: bool,
}

impl ExtractionStage {
    /// Pass skipping scanned originals and signed copies
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            excluded_names: vec!["fisico".to_string(), "assinado".to_string()],
            require_both_anchors: false,
        }
    }

    /// Pass skipping only scanned originals
    pub fn lenient() -> Self {
        Self {
            name: "lenient".to_string(),
            excluded_names: vec!["fisico".to_string()],
            require_both_anchors: true,
        }
    }
}

/// Placeholders replaced in the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateFields {
    /// Placeholder for the client's full name
    pub full_name: String,

    /// Placeholder for the qualification clause
    pub qualification: String,

    /// Link format for the generated document, `{id}` is substituted
    pub document_link: String,
}

impl Default for TemplateFields {
    fn default() -> Self {
        Self {
            full_name: "{{NOME_COMPLETO}}".to_string(),
            qualification: "{{QUALIFICACAO}}".to_string(),
            document_link: "https://docs.google.com/document/d/{id}/edit".to_string(),
        }
    }
}

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Pages read when a rule filters on text
    pub classification_pages: usize,

    /// Pages read when searching anchors
    pub extraction_pages: usize,

    /// Name allowlist applied before downloading
    pub relevance_pattern: String,

    /// MIME denylist applied before downloading
    pub media_exclude_pattern: String,

    /// Prefix ignored when detecting duplicate files
    pub copy_prefix: String,

    /// Whether the copy prefix and names compare case-sensitively
    pub dedup_case_sensitive: bool,

    /// Treat names within this edit distance as duplicates
    pub dedup_max_distance: Option<usize>,

    /// Maximum time for the field extraction call (seconds)
    pub llm_timeout_secs: u64,

    /// Extraction passes, in order
    pub stages: Vec<ExtractionStage>,

    /// Anchor pairs, in priority order
    pub anchors: Vec<AnchorPair>,

    /// Role table
    pub roles: Vec<RoleDefinition>,

    /// Output document placeholders
    pub template: TemplateFields,
}

impl ExtractorConfig {
    /// Get the field extraction timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Look up a role by name
    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.classification_pages == 0 {
            return Err("classification_pages must be greater than 0".to_string());
        }
        if self.extraction_pages == 0 {
            return Err("extraction_pages must be greater than 0".to_string());
        }
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        if self.stages.is_empty() {
            return Err("at least one extraction stage is required".to_string());
        }
        if self.anchors.is_empty() {
            return Err("at least one anchor pair is required".to_string());
        }

        check_pattern(&self.relevance_pattern)?;
        check_pattern(&self.media_exclude_pattern)?;

        for stage in &self.stages {
            for pattern in &stage.excluded_names {
                check_pattern(pattern)?;
            }
        }

        for anchor in &self.anchors {
            anchor.validate()?;
            check_pattern(&anchor.start)?;
            check_pattern(&anchor.end)?;
        }

        let mut seen = HashSet::new();
        for role in &self.roles {
            if role.name.is_empty() {
                return Err("role name cannot be empty".to_string());
            }
            if !seen.insert(role.name.as_str()) {
                return Err(format!("duplicate role '{}'", role.name));
            }
            for pattern in role.rules.iter().flat_map(|r| r.patterns()) {
                check_pattern(pattern)?;
            }
        }

        Ok(())
    }

    /// Single strict pass: signed copies are never read
    pub fn strict() -> Self {
        Self {
            stages: vec![ExtractionStage::strict()],
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            classification_pages: 1,
            extraction_pages: 4,
            relevance_pattern: DEFAULT_RELEVANCE_PATTERN.to_string(),
            media_exclude_pattern: DEFAULT_MEDIA_EXCLUDE_PATTERN.to_string(),
            copy_prefix: DEFAULT_COPY_PREFIX.to_string(),
            dedup_case_sensitive: true,
            dedup_max_distance: None,
            llm_timeout_secs: 60,
            stages: vec![ExtractionStage::strict(), ExtractionStage::lenient()],
            anchors: default_anchors(),
            roles: default_roles(),
            template: TemplateFields::default(),
        }
    }
}

/// Contract anchors: the contractor clause, then proxy-style documents
pub fn default_anchors() -> Vec<AnchorPair> {
    vec![
        AnchorPair {
            start: "CONTRATANTE".to_string(),
            end: "\nCLÁUSULA".to_string(),
        },
        AnchorPair {
            start: "CONTRATANTE|inventariante|OUTORGANTES".to_string(),
            end: "\nCLÁUSULA|nomeia|OUTORGADOS".to_string(),
        },
    ]
}

fn check_pattern(pattern: &str) -> Result<(), String> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| format!("invalid pattern '{}': {}", pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stages.len(), 2);
        assert!(config.role(CONTRACT_ROLE).is_some());
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = ExtractorConfig::strict();
        assert!(config.validate().is_ok());
        assert_eq!(config.stages, vec![ExtractionStage::strict()]);
    }

    #[test]
    fn test_invalid_pages() {
        let mut config = ExtractorConfig::default();
        config.extraction_pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut config = ExtractorConfig::default();
        config.relevance_pattern = "(unclosed".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let mut config = ExtractorConfig::default();
        let role = config.roles[0].clone();
        config.roles.push(role);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_anchor_rejected() {
        let mut config = ExtractorConfig::default();
        config.anchors.push(AnchorPair {
            start: String::new(),
            end: "x".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("extraction_pages = 2\n").unwrap();
        assert_eq!(parsed.extraction_pages, 2);
        assert_eq!(parsed.classification_pages, 1);
        assert_eq!(parsed.anchors, default_anchors());
    }

    #[test]
    fn test_toml_role_table() {
        let toml_str = r#"
            [[roles]]
            name = "Relatorio"
            required = false

            [[roles.rules]]
            name_contains = ["relatorio"]
            name_excludes = ["rascunho"]
        "#;
        let parsed = ExtractorConfig::from_toml(toml_str).unwrap();
        assert_eq!(parsed.roles.len(), 1);
        assert_eq!(parsed.roles[0].rules[0].name_excludes, vec!["rascunho"]);
        assert!(parsed.validate().is_ok());
    }
}
