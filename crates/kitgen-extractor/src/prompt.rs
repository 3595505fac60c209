//! LLM prompt for qualification extraction

/// Builds the prompt asking the LLM for the contractor's name and qualification
pub struct PromptBuilder<'a> {
    segment: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder around a contract segment
    pub fn new(segment: &'a str) -> Self {
        Self { segment }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            OBJECTIVE.len() + INSTRUCTIONS.len() + EXAMPLE.len() + self.segment.len() + 64,
        );

        prompt.push_str(OBJECTIVE);
        prompt.push_str("\n\n");
        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(EXAMPLE);
        prompt.push_str("\n\n");

        prompt.push_str("# Texto do contrato de honorários para análise:\n");
        prompt.push_str("<contrato>\n");
        prompt.push_str(self.segment.trim());
        prompt.push_str("\n</contrato>\n");

        prompt
    }
}

const OBJECTIVE: &str = "# Objetivos
- Analise o contrato de honorários advocatícios abaixo e informe os dados de qualificação do(a) contratante dos serviços advocatícios, no formato nome completo e qualificação (nacionalidade, estado civil, profissão, número do RG, número do CPF, endereço completo, incluindo CEP e o número de celular e/ou de telefone do contratante).";

const INSTRUCTIONS: &str = r#"# Instruções
- A qualificação deve conter os dados na seguinte ordem: nome completo, nacionalidade, estado civil, profissão, número do RG, número do CPF, endereço completo (incluindo CEP) e o número de celular e/ou de telefone.
- Se algum dado de qualificação não for encontrado, ignore na qualificação.
- Após extrair os dados, SEMPRE verifique se há algum erro (exemplo: confundir o nome do bairro com o nome da cidade, palavras grudadas sem espaço) e corrija o erro se houver.
- Não inclua informações adicionais ou explicações na resposta nem caracteres além do JSON.
- O endereço deve ser o do(a) contratante, e não o do advogado ou escritório de advocacia.
- No endereço, apenas a primeira letra de cada palavra fica em maiúscula. Exemplo: "R. São Paulo, 123, Centro, São Paulo - SP".
- Abreviações de logradouro têm espaço após o ponto: "R. ", "Av. ", "Tv. ".
- O telefone deve ser o do(a) contratante, formatado APENAS com DDD entre parênteses e sem o código do país: "Telefone: (xx) xxxxx-xxxx".
- NÃO use "cel./tel.", use apenas "Telefone:". NÃO inclua o prefixo +55.
- Responda no formato JSON, com as chaves "nome_completo" e "qualificacao"."#;

const EXAMPLE: &str = r#"# Exemplo de resposta correta:
{"nome_completo":"JOÃO DA SILVA SOUSA", "qualificacao":"brasileiro, solteiro, engenheiro, portador do RG n. 12.345.678-9 SSP/SP, inscrito no CPF sob o n. 123.456.789-00, residente e domiciliado na R. das Flores, 123, Centro, São Paulo - SP, CEP 01000-000, Telefone: (11) 91234-5678"}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_wraps_segment() {
        let prompt = PromptBuilder::new("  João Silva, brasileiro\n").build();
        assert!(prompt.contains("<contrato>\nJoão Silva, brasileiro\n</contrato>"));
    }

    #[test]
    fn test_prompt_names_json_keys() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains("\"nome_completo\""));
        assert!(prompt.contains("\"qualificacao\""));
        assert!(prompt.contains("Telefone: (xx) xxxxx-xxxx"));
    }

    #[test]
    fn test_segment_comes_last() {
        let prompt = PromptBuilder::new("SEGMENTO").build();
        let instructions = prompt.find("# Instruções").unwrap();
        let segment = prompt.find("SEGMENTO").unwrap();
        assert!(instructions < segment);
    }
}
