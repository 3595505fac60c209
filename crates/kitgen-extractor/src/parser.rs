//! Parse LLM output into client data

use crate::error::KitError;
use kitgen_domain::ClientData;

/// Parse the LLM reply into [`ClientData`]
///
/// Missing keys become empty fields; completeness is checked by the caller.
///
/// # Errors
///
/// Returns `KitError::InvalidResponse` if the reply is not a JSON object
pub fn parse_llm_response(response: &str) -> Result<ClientData, KitError> {
    let json_str = extract_json(response)?;

    let value: serde_json::Value = serde_json::from_str(&json_str)?;
    if !value.is_object() {
        return Err(KitError::InvalidResponse("Expected JSON object".to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, KitError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(KitError::InvalidResponse("Empty response".to_string()));
    }

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(KitError::InvalidResponse("Empty code block".to_string()));
        }

        // Skip the opening fence and, when present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_json() {
        let data = parse_llm_response(
            r#"{"nome_completo": "JOÃO DA SILVA", "qualificacao": "brasileiro, solteiro"}"#,
        )
        .unwrap();
        assert_eq!(data.full_name, "JOÃO DA SILVA");
        assert_eq!(data.qualification, "brasileiro, solteiro");
    }

    #[test]
    fn test_parse_code_fence() {
        let response = "```json\n{\"nome_completo\": \"MARIA\", \"qualificacao\": \"brasileira\"}\n```";
        let data = parse_llm_response(response).unwrap();
        assert_eq!(data.full_name, "MARIA");
    }

    #[test]
    fn test_parse_unterminated_code_fence() {
        let response = "```\n{\"nome_completo\": \"MARIA\", \"qualificacao\": \"brasileira\"}";
        assert_eq!(parse_llm_response(response).unwrap().qualification, "brasileira");
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let data = parse_llm_response(r#"{"nome_completo": "MARIA"}"#).unwrap();
        assert_eq!(data.qualification, "");
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_llm_response("not json"),
            Err(KitError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_llm_response("[1, 2]"),
            Err(KitError::InvalidResponse(_))
        ));
        assert!(matches!(parse_llm_response("  "), Err(KitError::InvalidResponse(_))));
    }
}
