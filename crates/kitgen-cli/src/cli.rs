//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kitgen - Generate a client's document kit from their Drive folder.
#[derive(Debug, Parser)]
#[command(name = "kitgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids and links only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the document kit for a client folder
    Generate(GenerateArgs),

    /// Show which files play which role in a client folder
    Scan(FolderArgs),

    /// Print the contractor clause found in a client folder
    Extract(FolderArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Drive access shared by every folder command.
#[derive(Debug, Args)]
pub struct DriveArgs {
    /// Drive access token
    #[arg(long, env = "KITGEN_DRIVE_TOKEN", hide_env_values = true)]
    pub drive_token: Option<String>,

    /// JSON file holding a Drive access token
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

/// Arguments for commands that only read a folder.
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Drive folder link or id
    pub link: String,

    #[command(flatten)]
    pub drive: DriveArgs,
}

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Drive folder link or id
    pub link: String,

    #[command(flatten)]
    pub drive: DriveArgs,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,

    /// Template document id
    #[arg(long, env = "KITGEN_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// Chat model, overriding the configuration file
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://drive.google.com/drive/folders/1AbC";

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from([
            "kitgen",
            "generate",
            LINK,
            "--drive-token",
            "tok",
            "--openai-key",
            "sk-test",
            "--template-id",
            "tmpl",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.link, LINK);
                assert_eq!(args.drive.drive_token.as_deref(), Some("tok"));
                assert_eq!(args.openai_key.as_deref(), Some("sk-test"));
                assert_eq!(args.template_id.as_deref(), Some("tmpl"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["kitgen", "scan", LINK, "-vv", "--format", "json", "--no-color"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Scan(_)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["kitgen", "--config", "/tmp/k.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_missing_link_is_rejected() {
        assert!(Cli::try_parse_from(["kitgen", "extract"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}
