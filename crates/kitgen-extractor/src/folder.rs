//! Folder listing, content retrieval and role lookup

use crate::classifier::FileClassifier;
use crate::config::ExtractorConfig;
use crate::dedup::Deduplicator;
use crate::error::KitError;
use crate::normalize::normalize;
use kitgen_domain::traits::{StorageProvider, TextExtractor};
use kitgen_domain::{FileDescriptor, ListingQuery};
use regex::{Regex, RegexBuilder};
use std::collections::{HashSet, VecDeque};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// The files of one client folder
///
/// The listing is fetched once, on the first call that needs it, and reused
/// for every role lookup.
pub struct FolderIndex<'a, S: StorageProvider, T: TextExtractor + ?Sized> {
    folder_id: String,
    storage: &'a S,
    text_extractor: &'a T,
    config: &'a ExtractorConfig,
    documents: Option<Vec<FileDescriptor>>,
}

impl<'a, S, T> FolderIndex<'a, S, T>
where
    S: StorageProvider,
    S::Error: Display,
    T: TextExtractor + ?Sized,
{
    /// Create an index over `folder_id`; nothing is listed yet
    pub fn new(
        folder_id: impl Into<String>,
        storage: &'a S,
        text_extractor: &'a T,
        config: &'a ExtractorConfig,
    ) -> Self {
        Self {
            folder_id: folder_id.into(),
            storage,
            text_extractor,
            config,
            documents: None,
        }
    }

    /// Folder this index covers
    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    /// Documents loaded so far, if any
    pub fn documents(&self) -> Option<&[FileDescriptor]> {
        self.documents.as_deref()
    }

    /// List the folder and store the result as this index's documents
    ///
    /// With `recursive`, the files of every sub-folder are merged in. With
    /// `with_content`, the listing is narrowed to relevant non-media files
    /// and their bytes are downloaded.
    ///
    /// # Errors
    ///
    /// - `KitError::FolderNotFound` if storage has no listing for the folder
    /// - `KitError::Transport` if the listing or download fails
    pub async fn list_files(
        &mut self,
        recursive: bool,
        with_content: bool,
    ) -> Result<&[FileDescriptor], KitError> {
        let mut files = self.list_folder(&self.folder_id).await?.ok_or_else(|| {
            KitError::FolderNotFound {
                folder_id: self.folder_id.clone(),
            }
        })?;
        info!("Listed {} file(s) in folder {}", files.len(), self.folder_id);

        if recursive {
            files.extend(self.list_sub_folders().await?);
        }

        if with_content {
            files = self.fetch_relevant(files).await?;
        }

        let documents = self.documents.insert(files);
        Ok(documents.as_slice())
    }

    /// Files of `role`, deduplicated
    ///
    /// Lists the folder with content first if that has not happened yet.
    ///
    /// # Errors
    ///
    /// - `KitError::InvalidRole` if the role is not in the rule table
    /// - `KitError::RequiredFileNotFound` if a required role matched nothing
    /// - any listing error from [`FolderIndex::list_files`]
    pub async fn get_file(&mut self, role: &str) -> Result<Vec<FileDescriptor>, KitError> {
        let definition = self
            .config
            .role(role)
            .ok_or_else(|| KitError::InvalidRole(role.to_string()))?;

        if self.documents.is_none() {
            self.list_files(false, true).await?;
        }
        let documents = self.documents.as_deref().unwrap_or_default();

        let classifier = FileClassifier::new(self.text_extractor, self.config.classification_pages);
        let matched = classifier.classify(documents, &definition.rules)?;

        let mut dedup = Deduplicator::new(self.config.copy_prefix.clone())
            .with_max_distance(self.config.dedup_max_distance);
        if !self.config.dedup_case_sensitive {
            dedup = dedup.case_insensitive();
        }
        let files = dedup.deduplicate(matched);
        info!("Role '{}': {} file(s)", role, files.len());

        if files.is_empty() && definition.required {
            warn!("No file found for required role '{}'", role);
            return Err(KitError::RequiredFileNotFound {
                role: role.to_string(),
            });
        }

        Ok(files)
    }

    /// Files directly under `folder_id`, `None` when storage does not know it
    async fn list_folder(&self, folder_id: &str) -> Result<Option<Vec<FileDescriptor>>, KitError> {
        let response = self
            .storage
            .search(&ListingQuery::files_in(folder_id))
            .await
            .map_err(transport)?;

        let Some(entries) = response.files else {
            return Ok(None);
        };

        let files = entries
            .iter()
            .filter_map(|entry| match entry.to_descriptor(folder_id) {
                Ok(file) if !file.is_folder() => Some(file),
                Ok(_) => None,
                Err(e) => {
                    debug!("Skipping entry {}: {}", entry.id, e);
                    None
                }
            })
            .collect();
        Ok(Some(files))
    }

    /// Files of every folder below this one, breadth first
    async fn list_sub_folders(&self) -> Result<Vec<FileDescriptor>, KitError> {
        let mut files = Vec::new();
        let mut visited: HashSet<String> = HashSet::from([self.folder_id.clone()]);
        let mut queue: VecDeque<String> = VecDeque::from([self.folder_id.clone()]);

        while let Some(parent) = queue.pop_front() {
            let response = self
                .storage
                .search(&ListingQuery::folders_in(parent.as_str()))
                .await
                .map_err(transport)?;

            for folder in response.files.unwrap_or_default() {
                if !visited.insert(folder.id.clone()) {
                    continue;
                }
                match self.list_folder(&folder.id).await? {
                    Some(children) => {
                        debug!("Sub-folder '{}': {} file(s)", folder.name, children.len());
                        files.extend(children);
                    }
                    None => warn!("Sub-folder '{}' vanished while listing", folder.name),
                }
                queue.push_back(folder.id);
            }
        }

        Ok(files)
    }

    /// Keep relevant non-media files and download their bytes
    async fn fetch_relevant(&self, files: Vec<FileDescriptor>) -> Result<Vec<FileDescriptor>, KitError> {
        let relevance = case_insensitive(&self.config.relevance_pattern)?;
        let media = case_insensitive(&self.config.media_exclude_pattern)?;

        let relevant: Vec<FileDescriptor> = files
            .into_iter()
            .filter(|f| relevance.is_match(&normalize(&f.name)) && !media.is_match(&f.mime_type))
            .collect();
        info!("{} relevant file(s) to download", relevant.len());

        if relevant.is_empty() {
            return Ok(relevant);
        }

        let ids: Vec<String> = relevant.iter().map(|f| f.id.clone()).collect();
        let contents = self.storage.batch_download(&ids).await.map_err(transport)?;
        if contents.len() != relevant.len() {
            return Err(KitError::Transport(format!(
                "Batch download returned {} item(s) for {} file(s)",
                contents.len(),
                relevant.len()
            )));
        }

        Ok(relevant
            .into_iter()
            .zip(contents)
            .map(|(file, bytes)| file.with_content(bytes))
            .collect())
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, KitError> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

fn transport<E: Display>(e: E) -> KitError {
    KitError::Transport(e.to_string())
}
