//! Configuration type definitions.

use crate::constants::report::{DURATION_HEADER, LABEL_HEADER, TITLE_SUFFIX};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    pub defaults: DefaultsConfig,

    /// CSV output settings.
    pub csv: CsvConfig,

    /// Report presentation settings.
    pub report: ReportConfig,
}

/// Default run settings, overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output formats.
    pub formats: Vec<OutputFormat>,

    /// Output directory (None = next to each input).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Csv],
            output_dir: None,
        }
    }
}

/// CSV output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CsvConfig {
    /// Write a UTF-8 byte order mark so spreadsheets detect the encoding.
    pub bom: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// Report headings shared by every output format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Header of the source name column.
    pub label_header: String,

    /// Header of the duration column.
    pub duration_header: String,

    /// Text after the file stem in the table title.
    pub title_suffix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            label_header: LABEL_HEADER.to_string(),
            duration_header: DURATION_HEADER.to_string(),
            title_suffix: TITLE_SUFFIX.to_string(),
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two-column CSV.
    Csv,
    /// JSON document with rows and summary.
    Json,
    /// Aligned plain-text table.
    Table,
    /// Printable PDF with a bordered table.
    Pdf,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "table" | "txt" | "text" => Ok(Self::Table),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("JSON".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!(
            "table".parse::<OutputFormat>().ok(),
            Some(OutputFormat::Table)
        );
        assert_eq!("txt".parse::<OutputFormat>().ok(), Some(OutputFormat::Table));
        assert_eq!("PDF".parse::<OutputFormat>().ok(), Some(OutputFormat::Pdf));
        assert!("docx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.defaults.formats, vec![OutputFormat::Csv]);
        assert!(config.defaults.output_dir.is_none());
        assert!(config.csv.bom);
        assert_eq!(config.report.label_header, "Ljudfil");
        assert_eq!(config.report.duration_header, "Längd");
    }
}
