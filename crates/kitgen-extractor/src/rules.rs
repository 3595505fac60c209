//! Role table and rule compilation

use crate::config::CONTRACT_ROLE;
use crate::error::KitError;
use crate::normalize::strip_accents;
use kitgen_domain::{ClassificationRule, RoleDefinition};
use regex::{Regex, RegexBuilder};

/// Built-in role table
///
/// The contract role accepts anything named like a contract or signing kit,
/// skips images, videos and audit/analysis reports, and requires the first
/// page to carry some text.
pub fn default_roles() -> Vec<RoleDefinition> {
    vec![RoleDefinition {
        name: CONTRACT_ROLE.to_string(),
        required: true,
        rules: vec![ClassificationRule {
            name_contains: vec![
                r"contrato|contratos|kit|assinar|cliente|prestacao de servicos".to_string(),
            ],
            name_excludes: vec![r"\.png|\.mp4|\.jpg|\.jpeg|auditoria|analise".to_string()],
            text_contains: vec![r"\w+".to_string()],
            text_excludes: vec![],
        }],
    }]
}

/// Compile name patterns: accents stripped, case-insensitive
pub(crate) fn compile_name_patterns(patterns: &[String]) -> Result<Vec<Regex>, KitError> {
    patterns
        .iter()
        .map(|p| build(&strip_accents(p)))
        .collect()
}

/// Compile text patterns: case-insensitive
pub(crate) fn compile_text_patterns(patterns: &[String]) -> Result<Vec<Regex>, KitError> {
    patterns.iter().map(|p| build(p)).collect()
}

fn build(pattern: &str) -> Result<Regex, KitError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| KitError::Config(format!("Invalid pattern '{}': {}", pattern, e)))
}

/// A classification rule with its patterns compiled
#[derive(Debug)]
pub(crate) struct CompiledRule {
    name_contains: Vec<Regex>,
    name_excludes: Vec<Regex>,
    text_contains: Vec<Regex>,
    text_excludes: Vec<Regex>,
    text_filters: bool,
}

impl CompiledRule {
    pub(crate) fn compile(rule: &ClassificationRule) -> Result<Self, KitError> {
        Ok(Self {
            name_contains: compile_name_patterns(&rule.name_contains)?,
            name_excludes: compile_name_patterns(&rule.name_excludes)?,
            text_contains: compile_text_patterns(&rule.text_contains)?,
            text_excludes: compile_text_patterns(&rule.text_excludes)?,
            text_filters: rule.has_text_filters(),
        })
    }

    pub(crate) fn has_text_filters(&self) -> bool {
        self.text_filters
    }

    /// `normalized_name` must already be normalized
    pub(crate) fn matches_name(&self, normalized_name: &str) -> bool {
        all_match(&self.name_contains, normalized_name) && none_match(&self.name_excludes, normalized_name)
    }

    /// `text` must already be lower-cased
    pub(crate) fn matches_text(&self, text: &str) -> bool {
        all_match(&self.text_contains, text) && none_match(&self.text_excludes, text)
    }
}

fn all_match(patterns: &[Regex], haystack: &str) -> bool {
    patterns.iter().all(|p| p.is_match(haystack))
}

fn none_match(patterns: &[Regex], haystack: &str) -> bool {
    !patterns.iter().any(|p| p.is_match(haystack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn contract_rule() -> CompiledRule {
        CompiledRule::compile(&default_roles()[0].rules[0]).unwrap()
    }

    #[test]
    fn test_contract_rule_names() {
        let rule = contract_rule();
        assert!(rule.matches_name(&normalize("Contrato - assinar.pdf")));
        assert!(rule.matches_name(&normalize("KIT Cliente.pdf")));
        assert!(rule.matches_name(&normalize("Prestação de Serviços.pdf")));
        assert!(!rule.matches_name(&normalize("Contrato.png")));
        assert!(!rule.matches_name(&normalize("Análise do contrato.pdf")));
        assert!(!rule.matches_name(&normalize("Relatório.pdf")));
    }

    #[test]
    fn test_empty_name_contains_always_passes() {
        let rule = CompiledRule::compile(&ClassificationRule::default()).unwrap();
        assert!(rule.matches_name("anything.pdf"));
        assert!(!rule.has_text_filters());
    }

    #[test]
    fn test_accented_name_pattern_matches_normalized_name() {
        let rule = CompiledRule::compile(&ClassificationRule {
            name_contains: vec!["físico".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(rule.matches_name(&normalize("Contrato FÍSICO.pdf")));
    }

    #[test]
    fn test_text_filters() {
        let rule = CompiledRule::compile(&ClassificationRule {
            text_contains: vec!["honorarios".to_string()],
            text_excludes: vec!["procuracao".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(rule.has_text_filters());
        assert!(rule.matches_text("contrato de honorarios"));
        assert!(!rule.matches_text("procuracao e contrato de honorarios"));
        assert!(!rule.matches_text(""));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = CompiledRule::compile(&ClassificationRule {
            name_contains: vec!["(".to_string()],
            ..Default::default()
        });
        assert!(matches!(result, Err(KitError::Config(_))));
    }
}
