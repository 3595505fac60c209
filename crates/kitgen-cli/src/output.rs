//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kitgen_extractor::{ExtractedSegment, KitOutcome, RoleMatches};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a generated kit.
    pub fn format_outcome(&self, outcome: &KitOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Quiet => Ok(outcome.link.clone()),
            OutputFormat::Table => Ok(format!(
                "{}\n  Client:   {}\n  Document: {}",
                self.success("Kit generated"),
                outcome.client_name,
                self.colorize(&outcome.link, "cyan")
            )),
        }
    }

    /// Format the files found for every role.
    pub fn format_roles(&self, roles: &[RoleMatches]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(roles)?),
            OutputFormat::Table => Ok(self.format_roles_table(roles)),
            OutputFormat::Quiet => Ok(roles
                .iter()
                .flat_map(|r| r.files.iter().map(|f| f.id.as_str()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_roles_table(&self, roles: &[RoleMatches]) -> String {
        if roles.iter().all(|r| r.files.is_empty()) {
            return self.colorize("No files matched any role.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Role", "Name", "Type", "ID"]);

        for role in roles {
            if role.files.is_empty() {
                let status = if role.required { "(missing)" } else { "(none)" };
                builder.push_record([role.role.as_str(), status, "", ""]);
                continue;
            }
            for file in &role.files {
                builder.push_record([
                    role.role.as_str(),
                    file.name.as_str(),
                    file.mime_type.as_str(),
                    file.id.as_str(),
                ]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = table.to_string();
        for role in roles.iter().filter(|r| r.is_missing()) {
            output.push('\n');
            output.push_str(&self.warning(&format!("Required role '{}' has no file", role.role)));
        }
        output
    }

    /// Format an extracted segment.
    pub fn format_segment(&self, segment: &ExtractedSegment) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "file_id": segment.source.id,
                "file_name": segment.source.name,
                "anchor_index": segment.anchor_index,
                "stage": segment.stage,
                "text": segment.text,
            }))?),
            OutputFormat::Quiet => Ok(segment.text.clone()),
            OutputFormat::Table => Ok(format!(
                "{}\n\n{}",
                self.info(&format!(
                    "{} (anchor {}, stage {})",
                    segment.source.name, segment.anchor_index, segment.stage
                )),
                segment.text
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitgen_domain::FileDescriptor;
    use kitgen_extractor::FileSummary;

    fn outcome() -> KitOutcome {
        KitOutcome {
            client_name: "MARIA SOUZA".to_string(),
            document_id: "doc-42".to_string(),
            link: "https://docs.google.com/document/d/doc-42/edit".to_string(),
        }
    }

    fn roles() -> Vec<RoleMatches> {
        vec![
            RoleMatches {
                role: "Contrato".to_string(),
                required: true,
                files: vec![FileSummary {
                    id: "f1".to_string(),
                    name: "Contrato.pdf".to_string(),
                    mime_type: "application/pdf".to_string(),
                }],
            },
            RoleMatches {
                role: "CNIS".to_string(),
                required: true,
                files: vec![],
            },
        ]
    }

    fn segment() -> ExtractedSegment {
        ExtractedSegment {
            text: "MARIA SOUZA, brasileira".to_string(),
            source: FileDescriptor::new("f1", "Contrato.pdf", vec![], "application/pdf").unwrap(),
            anchor_index: 0,
            stage: "strict".to_string(),
        }
    }

    #[test]
    fn test_outcome_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outcome(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["document_id"], "doc-42");
    }

    #[test]
    fn test_outcome_quiet_is_link() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_outcome(&outcome()).unwrap();
        assert_eq!(output, "https://docs.google.com/document/d/doc-42/edit");
    }

    #[test]
    fn test_roles_table_marks_missing() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_roles(&roles()).unwrap();
        assert!(output.contains("Contrato.pdf"));
        assert!(output.contains("(missing)"));
        assert!(output.contains("⚠ Required role 'CNIS' has no file"));
    }

    #[test]
    fn test_roles_quiet_lists_ids() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_roles(&roles()).unwrap(), "f1");
    }

    #[test]
    fn test_empty_roles() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_roles(&[]).unwrap();
        assert!(output.contains("No files matched"));
    }

    #[test]
    fn test_segment_formats() {
        let table = Formatter::new(OutputFormat::Table, false);
        assert!(table.format_segment(&segment()).unwrap().contains("Contrato.pdf (anchor 0, stage strict)"));

        let json = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&json.format_segment(&segment()).unwrap()).unwrap();
        assert_eq!(value["file_id"], "f1");

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_segment(&segment()).unwrap(), "MARIA SOUZA, brasileira");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
