//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use autos_domain::{PartySide, ProcessRecord};
use autos_sources::TribunalEntry;
use colored::*;
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

    /// Whether status messages may be printed next to the data.
    pub fn shows_messages(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Format a process record.
    pub fn format_record(&self, record: &ProcessRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(record.number.clone()),
        }
    }

    fn format_record_table(&self, record: &ProcessRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (field, value) in [
            ("Number", &record.number),
            ("Distributed", &record.distribution_date),
            ("Class", &record.case_class),
            ("Subject", &record.subject),
            ("Jurisdiction", &record.jurisdiction),
            ("Judging body", &record.judging_body),
        ] {
            builder.push_record([field.to_string(), value.clone()]);
        }

        let mut sections = vec![self.finish(builder)];

        sections.push(self.colorize("Parties", "cyan"));
        if record.claimant_parties.is_empty() && record.respondent_parties.is_empty() {
            sections.push(self.colorize("No parties found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Side", "Name", "Tax ID", "Kind", "Status", "Role"]);
            for (side, party) in record.parties() {
                let side_label = match side {
                    PartySide::Claimant => "Ativo",
                    PartySide::Respondent => "Passivo",
                };
                builder.push_record([
                    side_label.to_string(),
                    party.name.clone(),
                    party.tax_id.clone().unwrap_or_else(|| "-".to_string()),
                    party.person_kind(side).as_str().to_string(),
                    party.status.clone(),
                    party.role.clone(),
                ]);
            }
            sections.push(self.finish(builder));
        }

        sections.push(self.colorize("Movements", "cyan"));
        if record.movements.is_empty() {
            sections.push(self.colorize("No movements found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Date", "Description", "Document"]);
            for (index, movement) in record.movements.iter().enumerate() {
                builder.push_record([
                    (index + 1).to_string(),
                    movement.date.clone(),
                    movement.description.clone(),
                    movement.document.clone().unwrap_or_default(),
                ]);
            }
            sections.push(self.finish(builder));
        }

        sections.join("\n")
    }

    /// Format the tribunal dispatch table.
    pub fn format_tribunals(&self, tribunals: &[&TribunalEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(tribunals)?),
            OutputFormat::Quiet => Ok(tribunals
                .iter()
                .map(|t| t.code.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if tribunals.is_empty() {
                    return Ok(self.colorize("No tribunals registered.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Code", "Name", "Strategy", "API", "Base URL"]);
                for tribunal in tribunals {
                    builder.push_record([
                        tribunal.code.clone(),
                        tribunal.name.clone(),
                        tribunal.strategy.as_str().to_string(),
                        if tribunal.api_available { "yes" } else { "no" }.to_string(),
                        tribunal.base_url.clone(),
                    ]);
                }
                Ok(self.finish(builder))
            }
        }
    }

    fn finish(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
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
    use autos_domain::{Movement, Party};
    use autos_sources::TribunalRegistry;

    fn record() -> ProcessRecord {
        ProcessRecord {
            number: "5202268-77.2022.8.13.0024".to_string(),
            distribution_date: "21/09/2022".to_string(),
            case_class: "CUMPRIMENTO DE SENTENÇA".to_string(),
            subject: "Responsabilidade Civil".to_string(),
            jurisdiction: "Belo Horizonte".to_string(),
            judging_body: "CENTRASE Cível".to_string(),
            claimant_parties: vec![Party::new("DIEGO", Some("115.451.116-26".into()), "Ativo", "REQUERENTE")],
            respondent_parties: vec![],
            movements: vec![Movement::new("03/09/2025 13:05:25", "Juntada de Petição", None)],
        }
    }

    #[test]
    fn test_record_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&record()).unwrap();
        assert!(output.contains("Belo Horizonte"));
        assert!(output.contains("115.451.116-26"));
        assert!(output.contains("fisica"));
        assert!(output.contains("Juntada de Petição"));
        assert!(formatter.shows_messages());
    }

    #[test]
    fn test_record_json_is_canonical() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_record(&record()).unwrap();
        let parsed: ProcessRecord = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, record());
        assert!(output.contains("\"judgingBody\""));
        assert!(!formatter.shows_messages());
    }

    #[test]
    fn test_record_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_record(&record()).unwrap(), "5202268-77.2022.8.13.0024");
    }

    #[test]
    fn test_empty_sections() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&ProcessRecord::default()).unwrap();
        assert!(output.contains("No parties found."));
        assert!(output.contains("No movements found."));
    }

    #[test]
    fn test_tribunals() {
        let registry = TribunalRegistry::with_defaults();
        let tribunals = registry.list();

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_tribunals(&tribunals)
            .unwrap();
        assert!(quiet.lines().any(|code| code == "TJMG"));

        let table = Formatter::new(OutputFormat::Table, false)
            .format_tribunals(&tribunals)
            .unwrap();
        assert!(table.contains("aggregator"));
        assert!(table.contains("not implemented"));
    }

    #[test]
    fn test_messages_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("Saved"), "✓ Saved");
        assert_eq!(formatter.warning("Careful"), "⚠ Careful");
    }
}
