//! Drive listing and content download.

use crate::error::DriveError;
use crate::session::DriveSession;
use async_trait::async_trait;
use futures::future::try_join_all;
use kitgen_domain::traits::StorageProvider;
use kitgen_domain::{EntryKind, ListingQuery, SearchResponse, StorageEntry, FOLDER_MIME_TYPE};
use serde::Deserialize;
use tracing::{debug, error};

/// Entries requested per listing page
pub const PAGE_SIZE: u32 = 1000;

const LIST_FIELDS: &str = "nextPageToken, files(id, name, parents, mimeType)";

/// Build the Drive `q` expression for a listing
pub fn build_query(query: &ListingQuery) -> String {
    let operator = match query.kind {
        EntryKind::Files => "!=",
        EntryKind::Folders => "=",
    };
    format!(
        "'{}' in parents and mimeType {} '{}' and trashed = false",
        query.parent_id.replace('\'', "\\'"),
        operator,
        FOLDER_MIME_TYPE
    )
}

#[derive(Debug, Deserialize)]
struct ListPage {
    files: Option<Vec<StorageEntry>>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

/// Drive client implementing [`StorageProvider`]
pub struct DriveClient<'a> {
    session: &'a DriveSession,
}

impl<'a> DriveClient<'a> {
    /// Create a client borrowing `session`
    pub fn new(session: &'a DriveSession) -> Self {
        Self { session }
    }

    async fn list_page(
        &self,
        q: &str,
        page_token: Option<&str>,
    ) -> Result<Option<ListPage>, DriveError> {
        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![
            ("q", q),
            ("pageSize", page_size.as_str()),
            ("fields", LIST_FIELDS),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response = self
            .session
            .http()
            .get(self.session.drive_url("files"))
            .bearer_auth(self.session.token())
            .query(&params)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            debug!("Listing answered 404");
            return Ok(None);
        }
        let response = check_status(response).await?;
        let body: serde_json::Value = response.json().await?;
        if let Some(err) = body.get("error") {
            return Err(DriveError::InvalidResponse(err.to_string()));
        }

        Ok(Some(serde_json::from_value(body)?))
    }

    async fn download(&self, file_id: &str, index: usize, total: usize) -> Result<Vec<u8>, DriveError> {
        let response = self
            .session
            .http()
            .get(self.session.drive_url(&format!("files/{}", file_id)))
            .bearer_auth(self.session.token())
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(DriveError::NotFound(file_id.to_string()));
        }
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        debug!("File {}/{} downloaded ({} bytes)", index + 1, total, bytes.len());

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl<'a> StorageProvider for DriveClient<'a> {
    type Error = DriveError;

    async fn search(&self, query: &ListingQuery) -> Result<SearchResponse, Self::Error> {
        let q = build_query(query);
        debug!("Listing: {}", q);

        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let Some(page) = self.list_page(&q, page_token.as_deref()).await? else {
                return Ok(SearchResponse::not_found());
            };
            let Some(files) = page.files else {
                return Ok(SearchResponse::not_found());
            };
            entries.extend(files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listing returned {} entr(ies)", entries.len());
        Ok(SearchResponse::found(entries))
    }

    async fn batch_download(&self, file_ids: &[String]) -> Result<Vec<Vec<u8>>, Self::Error> {
        if file_ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Downloading {} file(s)", file_ids.len());

        let total = file_ids.len();
        let downloads = file_ids
            .iter()
            .enumerate()
            .map(|(index, id)| self.download(id, index, total));

        try_join_all(downloads).await.map_err(|e| {
            error!("Batch download failed: {}", e);
            e
        })
    }
}

/// Turn a non-success response into an error carrying its body
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    error!("Drive API error (HTTP {})", status);

    match status.as_u16() {
        401 | 403 => Err(DriveError::AuthError(format!("HTTP {}: {}", status, message))),
        code => Err(DriveError::Status { status: code, message }),
    }
}
