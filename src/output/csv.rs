//! CSV output format writer.

use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::{ReportHeadings, ReportWriter};
use crate::session::{ReportRow, ReportSummary};
use std::io::Write;
use std::path::PathBuf;

/// CSV format output writer: one header row, then `label,duration` rows.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
    headings: ReportHeadings,
}

impl<W: Write> CsvWriter<W> {
    /// Wrap an arbitrary sink. `path` is only used in error messages.
    pub fn new(mut inner: W, path: PathBuf, headings: ReportHeadings, bom: bool) -> Result<Self> {
        if bom {
            inner.write_all(UTF8_BOM)?;
        }
        Ok(Self {
            writer: csv::WriterBuilder::new()
                .terminator(csv::Terminator::CRLF)
                .from_writer(inner),
            path,
            headings,
        })
    }

    fn write_record(&mut self, fields: [&str; 2]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::CsvWrite {
                path: self.path.clone(),
                source: e,
            })
    }
}

impl<W: Write> ReportWriter for CsvWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        let label = self.headings.label.clone();
        let duration = self.headings.duration.clone();
        self.write_record([&label, &duration])
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.write_record([&row.label, &row.duration])
    }

    fn finalize(&mut self, _summary: &ReportSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::output::write_report;
    use crate::session::parse;
    use tempfile::NamedTempFile;

    fn headings() -> ReportHeadings {
        ReportHeadings::new(&ReportConfig::default(), "session")
    }

    #[test]
    fn test_csv_writer_rows() {
        let report = parse("1 1 Vox_take_02.wav 00:00:00:00 00:00:10:00");
        let mut buffer = Vec::new();
        {
            let mut writer =
                CsvWriter::new(&mut buffer, PathBuf::from("-"), headings(), false).unwrap();
            write_report(&mut writer, &report).unwrap();
        }

        let contents = String::from_utf8(buffer).unwrap();
        assert_eq!(
            contents,
            "Ljudfil,Längd\r\nVox take,00:00:10\r\nTotal Duration,00:00:10\r\n"
        );
    }

    #[test]
    fn test_csv_writer_quotes_commas() {
        let report = parse("1 1 Intro, Part A.wav 00:00:00:00 00:00:02:00");
        let mut buffer = Vec::new();
        {
            let mut writer =
                CsvWriter::new(&mut buffer, PathBuf::from("-"), headings(), false).unwrap();
            write_report(&mut writer, &report).unwrap();
        }

        let contents = String::from_utf8(buffer).unwrap();
        assert!(contents.contains("\"Intro, Part A\",00:00:02"));
    }

    #[test]
    fn test_csv_file_starts_with_bom() {
        let file = NamedTempFile::new().unwrap();
        let report = parse("");
        let sink = std::fs::File::create(file.path()).unwrap();
        let mut writer =
            CsvWriter::new(sink, file.path().to_path_buf(), headings(), true).unwrap();
        write_report(&mut writer, &report).unwrap();
        drop(writer);

        let bytes = std::fs::read(file.path()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8_lossy(&bytes[UTF8_BOM.len()..]).into_owned();
        assert_eq!(text, "Ljudfil,Längd\r\nTotal Duration,00:00:00\r\n");
    }
}
