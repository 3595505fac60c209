//! Command implementations.

pub mod config;
pub mod extract;
pub mod generate;
pub mod scan;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::generate::execute_generate;
pub use self::scan::execute_scan;

use crate::cli::DriveArgs;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use kitgen_drive::DriveSession;

/// Open a Drive session from the token flag, the token file flag or the
/// configured token file, in that order.
pub(crate) fn open_session(args: &DriveArgs, config: &Config) -> Result<DriveSession> {
    let session = match (&args.drive_token, &args.token_file, &config.drive.token_file) {
        (Some(token), _, _) if !token.trim().is_empty() => DriveSession::new(token.as_str())?,
        (_, Some(path), _) | (_, None, Some(path)) => DriveSession::from_token_file(path)?,
        _ => {
            return Err(ConfigError::MissingSecret {
                name: "Drive access token",
                flag: "--drive-token",
                env: "KITGEN_DRIVE_TOKEN",
            }
            .into())
        }
    };

    Ok(session.with_base_urls(&config.drive.drive_api, &config.drive.docs_api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::TempDir;

    fn drive_args(token: Option<&str>, token_file: Option<std::path::PathBuf>) -> DriveArgs {
        DriveArgs {
            drive_token: token.map(str::to_string),
            token_file,
        }
    }

    #[test]
    fn test_token_flag() {
        assert!(open_session(&drive_args(Some("tok"), None), &Config::default()).is_ok());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let result = open_session(&drive_args(None, None), &Config::default());
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::MissingSecret { .. }))
        ));
    }

    #[test]
    fn test_blank_token_without_file_is_config_error() {
        let result = open_session(&drive_args(Some("  "), None), &Config::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_configured_token_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, r#"{"token": "ya29.test"}"#).unwrap();

        let mut config = Config::default();
        config.drive.token_file = Some(path);
        assert!(open_session(&drive_args(None, None), &config).is_ok());
    }
}
