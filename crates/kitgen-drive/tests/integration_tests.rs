//! Integration tests for the Drive collaborators
//!
//! Tests reaching the real APIs need `KITGEN_DRIVE_TOKEN` and
//! `KITGEN_TEST_FOLDER` and are ignored by default.

use kitgen_domain::traits::StorageProvider;
use kitgen_domain::ListingQuery;
use kitgen_drive::{DriveClient, DriveError, DriveSession};

fn offline_session() -> DriveSession {
    DriveSession::new("test-token")
        .unwrap()
        .with_base_urls("http://127.0.0.1:1", "http://127.0.0.1:1")
}

#[tokio::test]
async fn test_search_unreachable_is_connection_error() {
    let session = offline_session();
    let client = DriveClient::new(&session);

    let result = client.search(&ListingQuery::files_in("folder")).await;
    assert!(matches!(result, Err(DriveError::ConnectionError(_))));
}

#[tokio::test]
async fn test_download_unreachable_fails_whole_batch() {
    let session = offline_session();
    let client = DriveClient::new(&session);

    let ids = vec!["a".to_string(), "b".to_string()];
    assert!(client.batch_download(&ids).await.is_err());
}

#[tokio::test]
#[ignore] // Requires Drive credentials
async fn test_list_real_folder() {
    let token = std::env::var("KITGEN_DRIVE_TOKEN").unwrap();
    let folder = std::env::var("KITGEN_TEST_FOLDER").unwrap();
    let session = DriveSession::new(token).unwrap();
    let client = DriveClient::new(&session);

    let listing = client.search(&ListingQuery::files_in(folder)).await.unwrap();
    assert!(listing.files.is_some());

    let missing = client
        .search(&ListingQuery::files_in("definitely-not-a-folder"))
        .await
        .unwrap();
    assert!(missing.files.is_none());
}
