//! Configuration management for the CLI.

use crate::error::{ConfigError, Result};
use kitgen_drive::{DEFAULT_DOCUMENT_NAME, DOCS_API_BASE, DRIVE_API_BASE};
use kitgen_extractor::ExtractorConfig;
use kitgen_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Language model provider
    #[serde(default)]
    pub openai: OpenAiSettings,

    /// Drive access
    #[serde(default)]
    pub drive: DriveSettings,

    /// Output document
    #[serde(default)]
    pub template: TemplateSettings,

    /// Extraction pipeline
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// OpenAI-compatible endpoint settings. The API key is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// Chat model
    pub model: String,
    /// Base URL of the API
    pub endpoint: String,
    /// HTTP timeout (seconds)
    pub timeout_secs: u64,
}

/// Drive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    /// JSON file holding an access token, used when no token is passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
    /// Drive v3 base URL
    pub drive_api: String,
    /// Docs v1 base URL
    pub docs_api: String,
}

/// Template document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Id of the template document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Name given to generated documents
    pub document_name: String,
}

impl Config {
    /// Default configuration file path (`~/.kitgen/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(".kitgen").join("config.toml"))
    }

    /// Resolve the configuration path, preferring an explicit one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(ConfigError::from)?;
        config.extractor.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialized form, as written by [`Config::save_to`].
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            token_file: None,
            drive_api: DRIVE_API_BASE.to_string(),
            docs_api: DOCS_API_BASE.to_string(),
        }
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            template_id: None,
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.openai.model, DEFAULT_MODEL);
        assert!(config.drive.token_file.is_none());
        assert_eq!(config.extractor, ExtractorConfig::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.template.document_name, DEFAULT_DOCUMENT_NAME);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.template.template_id = Some("tmpl-1".to_string());
        config.extractor.extraction_pages = 6;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.template.template_id.as_deref(), Some("tmpl-1"));
        assert_eq!(loaded.extractor.extraction_pages, 6);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[openai]\nmodel = \"gpt-4o\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.endpoint, DEFAULT_ENDPOINT);
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_extractor_section_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nrelevance_pattern = \"(\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let path = Config::resolve_path(Some(Path::new("/tmp/kit.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/kit.toml"));
    }
}
