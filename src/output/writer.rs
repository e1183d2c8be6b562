//! Report writer trait definition.

use crate::error::Result;
use crate::session::{Report, ReportRow, ReportSummary};

/// Trait for writing duration reports.
pub trait ReportWriter {
    /// Write the column header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single report row.
    fn write_row(&mut self, row: &ReportRow) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self, summary: &ReportSummary) -> Result<()>;
}

/// Write every row of `report`, total row last, then finalize.
pub fn write_report(writer: &mut dyn ReportWriter, report: &Report) -> Result<()> {
    writer.write_header()?;
    for row in report.rows() {
        writer.write_row(row)?;
    }
    writer.finalize(report.summary())
}
