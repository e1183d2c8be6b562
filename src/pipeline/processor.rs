//! Single input processing.

use crate::config::{OutputFormat, ReportConfig};
use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::{
    CsvWriter, JsonReportWriter, PdfWriter, ReportHeadings, ReportWriter, TableWriter,
    write_report,
};
use crate::pipeline::{InputSource, output_path_for};
use crate::session::{self, Report};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options shared by every processed input.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Output formats to generate.
    pub formats: Vec<OutputFormat>,
    /// Whether CSV files start with a UTF-8 byte order mark.
    pub csv_bom: bool,
    /// Column headers and title.
    pub report: ReportConfig,
}

/// Outcome of processing one input.
#[derive(Debug)]
pub struct ProcessResult {
    /// The parsed report.
    pub report: Report,
    /// Files written, in format order.
    pub outputs: Vec<PathBuf>,
}

/// Read a session export as text.
///
/// A leading byte order mark is dropped. Invalid UTF-8 is replaced rather
/// than rejected, since the parser skips anything it does not recognise.
pub fn read_session_text(input: &InputSource) -> Result<String> {
    let bytes = match input {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(|e| Error::InputRead {
                    path: PathBuf::from(crate::constants::STDIN_PATH),
                    source: e,
                })?;
            buffer
        }
        InputSource::File(path) => std::fs::read(path).map_err(|e| Error::InputRead {
            path: path.clone(),
            source: e,
        })?,
    };

    Ok(decode_session_bytes(&bytes, input))
}

fn decode_session_bytes(bytes: &[u8], input: &InputSource) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        std::borrow::Cow::Borrowed(text) => text.to_string(),
        std::borrow::Cow::Owned(text) => {
            warn!("{input} is not valid UTF-8; invalid bytes were replaced");
            text
        }
    }
}

/// Open a report writer of the given format over `sink`.
///
/// `path` is only used in error messages.
pub fn open_writer<'a, W: Write + 'a>(
    sink: W,
    path: PathBuf,
    format: OutputFormat,
    headings: ReportHeadings,
    csv_bom: bool,
) -> Result<Box<dyn ReportWriter + 'a>> {
    let writer: Box<dyn ReportWriter + 'a> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(sink, path, headings, csv_bom)?),
        OutputFormat::Json => Box::new(JsonReportWriter::new(sink, path, &headings)),
        OutputFormat::Table => Box::new(TableWriter::new(sink, headings)),
        OutputFormat::Pdf => Box::new(PdfWriter::new(sink, path, headings)),
    };
    Ok(writer)
}

/// Parse one input and write a report file per requested format.
pub fn process_input(
    input: &InputSource,
    output_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    info!("Processing: {input}");

    let text = read_session_text(input)?;
    let report = session::parse(&text);
    let summary = report.summary();
    debug!(
        "{} clip(s) matched, {} group clip(s) skipped, {} unreadable",
        summary.clips_matched, summary.group_clips_skipped, summary.clips_unreadable
    );

    if summary.clips_matched == 0 {
        warn!("No clips found in {input}");
    }

    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let headings = ReportHeadings::new(&options.report, &input.source_name());
    let mut outputs = Vec::with_capacity(options.formats.len());

    for &format in &options.formats {
        let path = output_path_for(input, output_dir, format);
        let file = File::create(&path)?;
        let mut writer = open_writer(
            BufWriter::new(file),
            path.clone(),
            format,
            headings.clone(),
            options.csv_bom,
        )?;
        write_report(writer.as_mut(), &report)?;
        debug!("Wrote {format} report: {}", path.display());
        outputs.push(path);
    }

    info!(
        "Complete: {} source(s), total {} ({input})",
        report.summary().sources,
        report.total_row().duration
    );

    Ok(ProcessResult { report, outputs })
}

/// Parse one input and print the report to `out` in a single format.
pub fn print_input<W: Write>(
    input: &InputSource,
    format: OutputFormat,
    options: &ProcessOptions,
    out: W,
) -> Result<Report> {
    let text = read_session_text(input)?;
    let report = session::parse(&text);

    let headings = ReportHeadings::new(&options.report, &input.source_name());
    let mut writer = open_writer(
        out,
        PathBuf::from(crate::constants::STDIN_PATH),
        format,
        headings,
        options.csv_bom,
    )?;
    write_report(writer.as_mut(), &report)?;

    Ok(report)
}
