//! JSON output format writer.

use crate::constants::session::TOTAL_LABEL;
use crate::error::{Error, Result};
use crate::output::{ReportHeadings, ReportWriter};
use crate::session::{ReportRow, ReportSummary, format_duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// JSON report file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// Source export name.
    pub source_file: String,
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Report rows in output order, total row last.
    pub rows: Vec<JsonRow>,
    /// The grand total, repeated from the last row.
    pub total: JsonRow,
    /// Parse statistics.
    pub summary: JsonSummary,
}

/// Single report row in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRow {
    /// Source name or total label.
    pub label: String,
    /// Duration as `HH:MM:SS`.
    pub duration: String,
    /// Duration in seconds.
    pub seconds: i64,
}

/// Parse statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Clip placements recognised.
    pub clips_matched: usize,
    /// Group clips left out.
    pub group_clips_skipped: usize,
    /// Clips with timecodes that could not be converted.
    pub clips_unreadable: usize,
    /// Distinct sources.
    pub sources: usize,
    /// Grand total in seconds.
    pub total_seconds: i64,
}

impl From<&ReportSummary> for JsonSummary {
    fn from(summary: &ReportSummary) -> Self {
        Self {
            clips_matched: summary.clips_matched,
            group_clips_skipped: summary.group_clips_skipped,
            clips_unreadable: summary.clips_unreadable,
            sources: summary.sources,
            total_seconds: summary.total_seconds,
        }
    }
}

/// Writer for JSON report output. Rows are collected and written as one
/// pretty-printed document on finalize.
pub struct JsonReportWriter<W: Write> {
    writer: W,
    path: PathBuf,
    source_file: String,
    rows: Vec<JsonRow>,
}

impl<W: Write> JsonReportWriter<W> {
    /// Wrap an arbitrary sink. `path` is only used in error messages.
    pub fn new(writer: W, path: PathBuf, headings: &ReportHeadings) -> Self {
        Self {
            writer,
            path,
            source_file: headings.source_name.clone(),
            rows: Vec::new(),
        }
    }
}

impl<W: Write> ReportWriter for JsonReportWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.rows.push(JsonRow {
            label: row.label.clone(),
            duration: row.duration.clone(),
            seconds: row.seconds,
        });
        Ok(())
    }

    fn finalize(&mut self, summary: &ReportSummary) -> Result<()> {
        let total = JsonRow {
            label: TOTAL_LABEL.to_string(),
            duration: format_duration(summary.total_seconds),
            seconds: summary.total_seconds,
        };
        let report = JsonReport {
            source_file: self.source_file.clone(),
            generated_at: Utc::now(),
            rows: std::mem::take(&mut self.rows),
            total,
            summary: summary.into(),
        };

        serde_json::to_writer_pretty(&mut self.writer, &report).map_err(|e| Error::JsonWrite {
            path: self.path.clone(),
            source: e,
        })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
