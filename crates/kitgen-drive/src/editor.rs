//! Output document creation from the Docs template.

use crate::client::check_status;
use crate::error::DriveError;
use crate::session::DriveSession;
use async_trait::async_trait;
use kitgen_domain::traits::TemplateEditor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// MIME type of a Google Docs document
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// Default name of the generated document
pub const DEFAULT_DOCUMENT_NAME: &str = "Kit Acidentário - Automação";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyRequest<'a> {
    name: &'a str,
    parents: [&'a str; 1],
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct CopyResponse {
    id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdate<'a> {
    requests: Vec<Request<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    replace_all_text: ReplaceAllText<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceAllText<'a> {
    contains_text: ContainsText<'a>,
    replace_text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainsText<'a> {
    text: &'a str,
    match_case: bool,
}

fn batch_update(replacements: &[(String, String)]) -> BatchUpdate<'_> {
    BatchUpdate {
        requests: replacements
            .iter()
            .map(|(placeholder, value)| Request {
                replace_all_text: ReplaceAllText {
                    contains_text: ContainsText {
                        text: placeholder,
                        match_case: false,
                    },
                    replace_text: value,
                },
            })
            .collect(),
    }
}

/// Copies the template document and fills in its placeholders
pub struct DocsTemplateEditor<'a> {
    session: &'a DriveSession,
    template_id: String,
    document_name: String,
}

impl<'a> DocsTemplateEditor<'a> {
    /// Create an editor for `template_id`
    pub fn new(session: &'a DriveSession, template_id: impl Into<String>) -> Self {
        Self {
            session,
            template_id: template_id.into(),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
        }
    }

    /// Name given to generated documents
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    async fn copy_template(&self, destination_folder_id: &str) -> Result<String, DriveError> {
        debug!("Copying template {}", self.template_id);
        let body = CopyRequest {
            name: &self.document_name,
            parents: [destination_folder_id],
            mime_type: DOCUMENT_MIME_TYPE,
        };

        let response = self
            .session
            .http()
            .post(self.session.drive_url(&format!("files/{}/copy", self.template_id)))
            .bearer_auth(self.session.token())
            .query(&[("supportsAllDrives", "true")])
            .json(&body)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(DriveError::NotFound(format!("template {}", self.template_id)));
        }
        let copy: CopyResponse = check_status(response).await?.json().await?;

        copy.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DriveError::InvalidResponse("Copy returned no document id".to_string()))
    }

    async fn replace(&self, document_id: &str, replacements: &[(String, String)]) -> Result<(), DriveError> {
        if replacements.is_empty() {
            warn!("No replacements to apply");
            return Ok(());
        }
        debug!("Applying {} replacement(s)", replacements.len());

        let response = self
            .session
            .http()
            .post(self.session.docs_url(&format!("documents/{}:batchUpdate", document_id)))
            .bearer_auth(self.session.token())
            .json(&batch_update(replacements))
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }
}

#[async_trait]
impl<'a> TemplateEditor for DocsTemplateEditor<'a> {
    type Error = DriveError;

    async fn render(
        &self,
        destination_folder_id: &str,
        replacements: &[(String, String)],
    ) -> Result<String, Self::Error> {
        let document_id = self.copy_template(destination_folder_id).await?;
        self.replace(&document_id, replacements).await?;
        info!("Document {} created", document_id);

        Ok(document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_update_body() {
        let replacements = vec![
            ("{{NOME_COMPLETO}}".to_string(), "MARIA SOUZA".to_string()),
            ("{{QUALIFICACAO}}".to_string(), "brasileira".to_string()),
        ];
        let body = serde_json::to_value(batch_update(&replacements)).unwrap();

        assert_eq!(
            body,
            json!({
                "requests": [
                    {"replaceAllText": {"containsText": {"text": "{{NOME_COMPLETO}}", "matchCase": false}, "replaceText": "MARIA SOUZA"}},
                    {"replaceAllText": {"containsText": {"text": "{{QUALIFICACAO}}", "matchCase": false}, "replaceText": "brasileira"}}
                ]
            })
        );
    }

    #[test]
    fn test_copy_request_body() {
        let body = serde_json::to_value(CopyRequest {
            name: "Kit",
            parents: ["folder-1"],
            mime_type: DOCUMENT_MIME_TYPE,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"name": "Kit", "parents": ["folder-1"], "mimeType": "application/vnd.google-apps.document"})
        );
    }

    #[test]
    fn test_copy_response_without_id() {
        let copy: CopyResponse = serde_json::from_str(r#"{"kind": "drive#file"}"#).unwrap();
        assert!(copy.id.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_connection_error() {
        let session = DriveSession::new("t")
            .unwrap()
            .with_base_urls("http://127.0.0.1:1", "http://127.0.0.1:1");
        let editor = DocsTemplateEditor::new(&session, "template");

        let result = editor.render("folder", &[]).await;
        assert!(matches!(result, Err(DriveError::ConnectionError(_))));
    }
}
