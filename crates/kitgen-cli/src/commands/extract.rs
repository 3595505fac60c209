//! Extract command implementation.

use super::open_session;
use crate::cli::FolderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use kitgen_drive::DriveClient;
use kitgen_extractor::{DocumentTextExtractor, FolderScanner};

/// Execute the extract command.
pub async fn execute_extract(args: FolderArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let session = open_session(&args.drive, config)?;
    let scanner = FolderScanner::new(
        DriveClient::new(&session),
        DocumentTextExtractor::new(),
        config.extractor.clone(),
    )?;

    let segment = scanner.locate_segment(&args.link).await?;
    println!("{}", formatter.format_segment(&segment)?);

    Ok(())
}
