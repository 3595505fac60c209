//! Client data extraction over an LLM

use crate::error::KitError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use kitgen_domain::traits::LlmProvider;
use kitgen_domain::ClientData;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, error, info};

/// Turns a contract segment into the contractor's name and qualification
pub struct QualificationExtractor<L: LlmProvider> {
    llm: L,
    timeout: Duration,
}

impl<L> QualificationExtractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create an extractor giving the LLM at most `timeout` per request
    pub fn new(llm: L, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// Access the underlying provider
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Ask the LLM for the client data in `segment`
    ///
    /// # Errors
    ///
    /// - `KitError::Transport` if the provider fails or times out
    /// - `KitError::InvalidResponse` if the reply is not a JSON object
    /// - `KitError::IncompleteExtractedData` if a field is missing or blank
    pub async fn extract(&self, segment: &str) -> Result<ClientData, KitError> {
        let prompt = PromptBuilder::new(segment).build();
        debug!("Sending contract segment for extraction ({} chars)", prompt.len());

        let response = tokio::time::timeout(self.timeout, self.llm.generate_json(&prompt))
            .await
            .map_err(|_| {
                error!("LLM request timed out after {:?}", self.timeout);
                KitError::Transport(format!("LLM request timed out after {:?}", self.timeout))
            })?
            .map_err(|e| {
                error!("LLM request failed: {}", e);
                KitError::Transport(e.to_string())
            })?;
        debug!("LLM response: {} chars", response.len());

        let data = parse_llm_response(&response)?;
        if let Err(reason) = data.validate() {
            error!("Extracted data is incomplete: {}", reason);
            return Err(KitError::IncompleteExtractedData(reason));
        }

        info!("Extracted data for {}", data.full_name);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kitgen_llm::MockProvider;

    const REPLY: &str = r#"{"nome_completo": "JOÃO DA SILVA", "qualificacao": "brasileiro, solteiro, Telefone: (11) 91234-5678"}"#;

    fn extractor(reply: &str) -> QualificationExtractor<MockProvider> {
        QualificationExtractor::new(MockProvider::new(reply), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_extract_complete_data() {
        let fields = extractor(REPLY);
        let data = fields.extract(" João da Silva, brasileiro").await.unwrap();

        assert_eq!(data.full_name, "JOÃO DA SILVA");
        assert_eq!(data.qualification_without_phone(), "brasileiro, solteiro");
        assert_eq!(fields.llm().call_count(), 1);
        assert!(fields.llm().last_prompt().unwrap().contains("João da Silva, brasileiro"));
    }

    #[tokio::test]
    async fn test_blank_field_is_incomplete() {
        let fields = extractor(r#"{"nome_completo": "JOÃO", "qualificacao": "  "}"#);
        let result = fields.extract("segmento").await;
        assert!(matches!(result, Err(KitError::IncompleteExtractedData(_))));
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let fields = extractor("Desculpe, não consegui.");
        let result = fields.extract("segmento").await;
        assert!(matches!(result, Err(KitError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_provider_error_is_transport() {
        let mut llm = MockProvider::default();
        let prompt = PromptBuilder::new("segmento").build();
        llm.add_error(prompt);

        let fields = QualificationExtractor::new(llm, Duration::from_secs(5));
        let result = fields.extract("segmento").await;
        assert!(matches!(result, Err(KitError::Transport(_))));
    }

    struct SlowProvider;

    #[async_trait]
    impl LlmProvider for SlowProvider {
        type Error = String;

        async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(REPLY.to_string())
        }

        async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
            self.generate(prompt).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_transport() {
        let fields = QualificationExtractor::new(SlowProvider, Duration::from_secs(1));
        let result = fields.extract("segmento").await;
        assert!(matches!(result, Err(KitError::Transport(msg)) if msg.contains("timed out")));
    }
}
