//! Output type definitions.

use crate::config::ReportConfig;

/// Headings shared by all report formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeadings {
    /// Name of the report's source export, without extension.
    pub source_name: String,
    /// Header of the label column.
    pub label: String,
    /// Header of the duration column.
    pub duration: String,
    /// Title line, e.g. `session - Musikrapport`.
    pub title: String,
}

impl ReportHeadings {
    /// Build headings for the export named `source_name`.
    pub fn new(config: &ReportConfig, source_name: &str) -> Self {
        let title = if config.title_suffix.is_empty() {
            source_name.to_string()
        } else {
            format!("{source_name} - {}", config.title_suffix)
        };

        Self {
            source_name: source_name.to_string(),
            label: config.label_header.clone(),
            duration: config.duration_header.clone(),
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_from_default_config() {
        let headings = ReportHeadings::new(&ReportConfig::default(), "Session 1");
        assert_eq!(headings.title, "Session 1 - Musikrapport");
        assert_eq!(headings.label, "Ljudfil");
        assert_eq!(headings.duration, "Längd");
    }

    #[test]
    fn test_empty_suffix_uses_bare_name() {
        let config = ReportConfig {
            title_suffix: String::new(),
            ..ReportConfig::default()
        };
        assert_eq!(ReportHeadings::new(&config, "mix").title, "mix");
    }
}
