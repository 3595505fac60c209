//! Generate command implementation.

use super::open_session;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::Formatter;
use kitgen_drive::{DocsTemplateEditor, DriveClient};
use kitgen_extractor::{DocumentTextExtractor, KitPipeline};
use kitgen_llm::OpenAiProvider;
use tracing::debug;

/// Execute the generate command.
pub async fn execute_generate(args: GenerateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    // Every secret is resolved before the first request
    let api_key = args
        .openai_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingSecret {
            name: "OpenAI API key",
            flag: "--openai-key",
            env: "OPENAI_API_KEY",
        })?;
    let template_id = args
        .template_id
        .or_else(|| config.template.template_id.clone())
        .filter(|id| !id.trim().is_empty())
        .ok_or(ConfigError::MissingSecret {
            name: "Template document id",
            flag: "--template-id",
            env: "KITGEN_TEMPLATE_ID",
        })?;
    let session = open_session(&args.drive, config)?;

    let model = args.model.unwrap_or_else(|| config.openai.model.clone());
    debug!("Using model {} at {}", model, config.openai.endpoint);
    let llm = OpenAiProvider::with_options(
        api_key,
        model,
        config.openai.endpoint.as_str(),
        config.openai.timeout_secs,
    )?;

    let editor = DocsTemplateEditor::new(&session, template_id)
        .with_document_name(config.template.document_name.as_str());
    let pipeline = KitPipeline::new(
        DriveClient::new(&session),
        DocumentTextExtractor::new(),
        llm,
        editor,
        config.extractor.clone(),
    )?;

    let outcome = pipeline.generate(&args.link).await?;
    println!("{}", formatter.format_outcome(&outcome)?);

    Ok(())
}
