//! Plain-text table writer.
//!
//! Lays the report out as a titled two-column table sized to its longest
//! label, for reading on screen or printing.

use crate::error::Result;
use crate::output::{ReportHeadings, ReportWriter};
use crate::session::{ReportRow, ReportSummary};
use std::io::Write;

/// Gap between the label and duration columns.
const COLUMN_GAP: usize = 2;

/// Table format output writer.
pub struct TableWriter<W: Write> {
    writer: W,
    headings: ReportHeadings,
    rows: Vec<(String, String)>,
}

impl<W: Write> TableWriter<W> {
    /// Wrap an arbitrary sink.
    pub const fn new(writer: W, headings: ReportHeadings) -> Self {
        Self {
            writer,
            headings,
            rows: Vec::new(),
        }
    }
}

impl<W: Write> ReportWriter for TableWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        // Column widths depend on every row, so the header is laid out on finalize.
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.rows.push((row.label.clone(), row.duration.clone()));
        Ok(())
    }

    fn finalize(&mut self, _summary: &ReportSummary) -> Result<()> {
        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .chain(std::iter::once(self.headings.label.chars().count()))
            .max()
            .unwrap_or(0)
            + COLUMN_GAP;
        let duration_width = self
            .rows
            .iter()
            .map(|(_, duration)| duration.chars().count())
            .chain(std::iter::once(self.headings.duration.chars().count()))
            .max()
            .unwrap_or(0);

        writeln!(self.writer, "{}", self.headings.title)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{:<label_width$}{:>duration_width$}",
            self.headings.label, self.headings.duration
        )?;
        for (label, duration) in &self.rows {
            writeln!(self.writer, "{label:<label_width$}{duration:>duration_width$}")?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
