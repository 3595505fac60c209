//! Client data extracted from the contract segment

use serde::{Deserialize, Serialize};

/// Fields returned by the field-extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    /// Contractor's full name
    #[serde(rename = "nome_completo", default)]
    pub full_name: String,

    /// Qualification clause (nationality, marital status, documents, address, phone)
    #[serde(rename = "qualificacao", default)]
    pub qualification: String,
}

impl ClientData {
    /// Create client data from both fields
    pub fn new(full_name: impl Into<String>, qualification: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            qualification: qualification.into(),
        }
    }

    /// Check that both fields carry text
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("full name is empty".to_string());
        }
        if self.qualification.trim().is_empty() {
            return Err("qualification is empty".to_string());
        }
        Ok(())
    }

    /// Qualification with the trailing `, Telefone: ...` clause removed
    pub fn qualification_without_phone(&self) -> String {
        if let Some(idx) = self.qualification.find("Telefone:") {
            let head = self.qualification[..idx].trim_end();
            if let Some(stripped) = head.strip_suffix(',') {
                return stripped.to_string();
            }
        }
        self.qualification.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(ClientData::new("JOÃO DA SILVA", "brasileiro, solteiro").validate().is_ok());
        assert!(ClientData::new("", "brasileiro").validate().is_err());
        assert!(ClientData::new("JOÃO", "   ").validate().is_err());
    }

    #[test]
    fn test_qualification_without_phone() {
        let data = ClientData::new(
            "JOÃO",
            "brasileiro, solteiro, CEP 01000-000, Telefone: (11) 91234-5678",
        );
        assert_eq!(data.qualification_without_phone(), "brasileiro, solteiro, CEP 01000-000");
    }

    #[test]
    fn test_qualification_without_phone_no_phone() {
        let data = ClientData::new("JOÃO", "brasileiro, solteiro");
        assert_eq!(data.qualification_without_phone(), "brasileiro, solteiro");
    }

    #[test]
    fn test_deserializes_portuguese_keys() {
        let json = r#"{"nome_completo": "MARIA SOUZA", "qualificacao": "brasileira"}"#;
        let data: ClientData = serde_json::from_str(json).unwrap();
        assert_eq!(data.full_name, "MARIA SOUZA");
        assert_eq!(data.qualification, "brasileira");
    }
}
