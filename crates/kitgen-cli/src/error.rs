//! Error types for the CLI application.

use kitgen_drive::DriveError;
use kitgen_extractor::KitError;
use kitgen_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Configuration problems detected before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A secret is neither on the command line, in the environment nor in the config
    #[error("{name} is not set (use {flag} or the {env} environment variable)")]
    MissingSecret {
        /// Human-readable name of the secret
        name: &'static str,
        /// Command-line flag
        flag: &'static str,
        /// Environment variable
        env: &'static str,
    },

    /// Home directory could not be determined
    #[error("Could not find home directory")]
    NoHomeDirectory,

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline error
    #[error(transparent)]
    Kit(#[from] KitError),

    /// Drive session error
    #[error("Drive error: {0}")]
    Drive(#[from] DriveError),

    /// LLM provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Message shown to the person running the command
    ///
    /// Pipeline failures use their stable user-facing sentence; everything
    /// else shows the diagnostic.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Kit(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}
