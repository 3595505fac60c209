//! End-to-end kit generation
//!
//! ```text
//! folder link → FolderIndex → FileClassifier → Deduplicator
//!             → SegmentExtractor → QualificationExtractor → TemplateEditor
//! ```

use crate::config::{ExtractorConfig, CONTRACT_ROLE};
use crate::error::KitError;
use crate::fields::QualificationExtractor;
use crate::folder::FolderIndex;
use crate::segment::{ExtractedSegment, SegmentExtractor};
use crate::types::{FileSummary, KitOutcome, RoleMatches};
use kitgen_domain::traits::{LlmProvider, StorageProvider, TemplateEditor, TextExtractor};
use kitgen_domain::ClientData;
use std::fmt::Display;
use tracing::{debug, error, info};

/// Derive the folder id from a folder link
///
/// The id is the last path segment, with any query string or fragment
/// dropped. A bare id is returned unchanged.
///
/// # Errors
///
/// Returns `KitError::InvalidFolderLink` for a blank link or one with no id
///
/// # Examples
///
/// ```
/// use kitgen_extractor::parse_folder_link;
///
/// let id = parse_folder_link("https://drive.google.com/drive/folders/1AbC?usp=sharing").unwrap();
/// assert_eq!(id, "1AbC");
/// assert!(parse_folder_link("   ").is_err());
/// ```
pub fn parse_folder_link(link: &str) -> Result<String, KitError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(KitError::InvalidFolderLink(link.to_string()));
    }

    let path = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    match path.rsplit('/').next() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(KitError::InvalidFolderLink(link.to_string())),
    }
}

/// Folder inspection without the LLM or the template editor
pub struct FolderScanner<S, T>
where
    S: StorageProvider,
    T: TextExtractor,
{
    storage: S,
    text_extractor: T,
    config: ExtractorConfig,
}

impl<S, T> FolderScanner<S, T>
where
    S: StorageProvider,
    S::Error: Display,
    T: TextExtractor,
{
    /// Create a scanner
    ///
    /// # Errors
    ///
    /// Returns `KitError::Config` if the configuration is invalid
    pub fn new(storage: S, text_extractor: T, config: ExtractorConfig) -> Result<Self, KitError> {
        config.validate().map_err(KitError::Config)?;
        Ok(Self {
            storage,
            text_extractor,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Storage collaborator
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Files found for every role
    ///
    /// An empty required role is reported, not raised.
    pub async fn scan(&self, folder_link: &str) -> Result<Vec<RoleMatches>, KitError> {
        let folder_id = parse_folder_link(folder_link)?;
        let mut index = self.index(&folder_id);
        index.list_files(false, true).await?;

        let mut matches = Vec::with_capacity(self.config.roles.len());
        for role in &self.config.roles {
            let files = match index.get_file(&role.name).await {
                Ok(files) => files,
                Err(KitError::RequiredFileNotFound { .. }) => Vec::new(),
                Err(e) => return Err(e),
            };
            matches.push(RoleMatches {
                role: role.name.clone(),
                required: role.required,
                files: files.iter().map(FileSummary::from).collect(),
            });
        }

        Ok(matches)
    }

    /// Contract segment for the folder behind `folder_link`
    pub async fn locate_segment(&self, folder_link: &str) -> Result<ExtractedSegment, KitError> {
        let folder_id = parse_folder_link(folder_link)?;
        self.segment(&folder_id).await
    }

    async fn segment(&self, folder_id: &str) -> Result<ExtractedSegment, KitError> {
        let mut index = self.index(folder_id);
        let contracts = index.get_file(CONTRACT_ROLE).await?;
        debug!("{} contract candidate(s)", contracts.len());

        SegmentExtractor::new(
            &self.text_extractor,
            self.config.extraction_pages,
            &self.config.stages,
        )
        .extract_segment(&contracts, &self.config.anchors)
    }

    fn index<'a>(&'a self, folder_id: &str) -> FolderIndex<'a, S, T> {
        FolderIndex::new(folder_id, &self.storage, &self.text_extractor, &self.config)
    }
}

/// Runs the kit generation for one folder at a time
pub struct KitPipeline<S, T, L, E>
where
    S: StorageProvider,
    T: TextExtractor,
    L: LlmProvider,
    E: TemplateEditor,
{
    scanner: FolderScanner<S, T>,
    fields: QualificationExtractor<L>,
    editor: E,
}

impl<S, T, L, E> KitPipeline<S, T, L, E>
where
    S: StorageProvider,
    S::Error: Display,
    T: TextExtractor,
    L: LlmProvider,
    L::Error: Display,
    E: TemplateEditor,
    E::Error: Display,
{
    /// Create a pipeline
    ///
    /// # Errors
    ///
    /// Returns `KitError::Config` if the configuration is invalid
    pub fn new(
        storage: S,
        text_extractor: T,
        llm: L,
        editor: E,
        config: ExtractorConfig,
    ) -> Result<Self, KitError> {
        let fields = QualificationExtractor::new(llm, config.llm_timeout());
        let scanner = FolderScanner::new(storage, text_extractor, config)?;

        Ok(Self {
            scanner,
            fields,
            editor,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        self.scanner.config()
    }

    /// Storage collaborator
    pub fn storage(&self) -> &S {
        self.scanner.storage()
    }

    /// Template collaborator
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Generate the kit for the client folder behind `folder_link`
    ///
    /// The document is created inside the client folder.
    pub async fn generate(&self, folder_link: &str) -> Result<KitOutcome, KitError> {
        let folder_id = parse_folder_link(folder_link)?;
        info!("Generating kit for folder {}", folder_id);

        let outcome = self.run(&folder_id).await;
        if let Err(e) = &outcome {
            error!("Kit generation failed: {}", e);
        }
        outcome
    }

    /// Files found for every role, without calling the LLM or the editor
    pub async fn scan(&self, folder_link: &str) -> Result<Vec<RoleMatches>, KitError> {
        self.scanner.scan(folder_link).await
    }

    /// Contract segment for the folder, without calling the LLM or the editor
    pub async fn locate_segment(&self, folder_link: &str) -> Result<ExtractedSegment, KitError> {
        self.scanner.locate_segment(folder_link).await
    }

    async fn run(&self, folder_id: &str) -> Result<KitOutcome, KitError> {
        let segment = self.scanner.segment(folder_id).await?;
        let data = self.fields.extract(&segment.text).await?;

        let document_id = self
            .editor
            .render(folder_id, &self.replacements(&data))
            .await
            .map_err(|e| KitError::Transport(e.to_string()))?;
        info!("Kit generated: {}", document_id);

        Ok(KitOutcome {
            client_name: data.full_name,
            link: self.config().template.document_link.replace("{id}", &document_id),
            document_id,
        })
    }

    fn replacements(&self, data: &ClientData) -> Vec<(String, String)> {
        let template = &self.config().template;
        vec![
            (template.full_name.clone(), data.full_name.clone()),
            (template.qualification.clone(), data.qualification.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_link() {
        assert_eq!(
            parse_folder_link("https://drive.google.com/drive/folders/1AbC").unwrap(),
            "1AbC"
        );
        assert_eq!(
            parse_folder_link("https://drive.google.com/drive/folders/1AbC/?usp=sharing").unwrap(),
            "1AbC"
        );
        assert_eq!(parse_folder_link(" 1AbC ").unwrap(), "1AbC");
    }

    #[test]
    fn test_parse_folder_link_rejects_blank() {
        assert!(matches!(parse_folder_link(""), Err(KitError::InvalidFolderLink(_))));
        assert!(matches!(parse_folder_link(" \t"), Err(KitError::InvalidFolderLink(_))));
        assert!(matches!(parse_folder_link("?usp=sharing"), Err(KitError::InvalidFolderLink(_))));
    }
}
