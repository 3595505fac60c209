//! Declarative classification rules
//!
//! A role is an ordered list of rules. Rules are plain data: adding a role or a
//! fallback tier never requires new evaluation code.

use serde::{Deserialize, Serialize};

/// One tier of a role's classification rules
///
/// Every field is a list of regex patterns. Name patterns are matched against
/// the normalized (accent-free, lower-cased) file name, text patterns against
/// the lower-cased text of the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// All must match the name (empty list always passes)
    #[serde(default)]
    pub name_contains: Vec<String>,

    /// None may match the name
    #[serde(default)]
    pub name_excludes: Vec<String>,

    /// All must match the first-page text
    #[serde(default)]
    pub text_contains: Vec<String>,

    /// None may match the first-page text
    #[serde(default)]
    pub text_excludes: Vec<String>,
}

impl ClassificationRule {
    /// Whether evaluating this rule requires extracting text
    pub fn has_text_filters(&self) -> bool {
        !self.text_contains.is_empty() || !self.text_excludes.is_empty()
    }

    /// All patterns of the rule, for upfront compilation checks
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.name_contains
            .iter()
            .chain(&self.name_excludes)
            .chain(&self.text_contains)
            .chain(&self.text_excludes)
            .map(String::as_str)
    }
}

/// A named role with its ordered rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name, e.g. "Contrato"
    pub name: String,

    /// Whether an empty classification result is an error for this role
    #[serde(default)]
    pub required: bool,

    /// Rules tried in order; the first one with a match wins
    #[serde(default)]
    pub rules: Vec<ClassificationRule>,
}
