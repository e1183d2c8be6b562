//! PDF output format writer.
//!
//! Lays the report out on A4 pages: a centred title, then a bordered
//! two-column table. The label column is sized from the longest label and
//! the header row is repeated at the top of every continuation page.
//! Text is set in the standard Helvetica font with `WinAnsiEncoding`, so
//! characters outside Latin-1 print as `?`.

use crate::error::{Error, Result};
use crate::output::{ReportHeadings, ReportWriter};
use crate::session::{ReportRow, ReportSummary};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::io::Write;
use std::path::PathBuf;

/// Points per millimetre. Layout is done in millimetres.
const MM: f32 = 72.0 / 25.4;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
/// Rows never start below this distance from the bottom edge.
const BOTTOM_MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 10.0;
/// Width of the cell the title is centred in.
const TITLE_WIDTH: f32 = 200.0;
const DURATION_WIDTH: f32 = 40.0;
/// Label column width per character of the longest label.
const LABEL_WIDTH_PER_CHAR: f32 = 2.0;
/// Horizontal padding between a cell border and its text.
const CELL_PADDING: f32 = 1.0;

const TITLE_FONT_SIZE: f32 = 12.0;
const BODY_FONT_SIZE: f32 = 10.0;

const FONT: Name<'static> = Name(b"F1");

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width used for bytes outside the ASCII table.
const DEFAULT_WIDTH: u16 = 556;

/// PDF format output writer. Rows are collected and the document is
/// rendered on finalize.
pub struct PdfWriter<W: Write> {
    writer: W,
    path: PathBuf,
    headings: ReportHeadings,
    rows: Vec<(String, String)>,
}

impl<W: Write> PdfWriter<W> {
    /// Wrap an arbitrary sink. `path` is only used in error messages.
    pub const fn new(writer: W, path: PathBuf, headings: ReportHeadings) -> Self {
        Self {
            writer,
            path,
            headings,
            rows: Vec::new(),
        }
    }

    fn render(&self) -> Vec<u8> {
        let label_width = self.label_column_width();
        let mut pages = Vec::new();
        let mut page = Content::new();

        show_text(
            &mut page,
            TITLE_FONT_SIZE,
            MARGIN + (TITLE_WIDTH - text_width(&self.headings.title, TITLE_FONT_SIZE)) / 2.0,
            MARGIN,
            &self.headings.title,
        );
        // Title cell, then a blank line.
        let mut y = MARGIN + 2.0 * ROW_HEIGHT;
        draw_row(&mut page, label_width, y, &self.headings.label, &self.headings.duration);
        y += ROW_HEIGHT;

        for (label, duration) in &self.rows {
            if y + ROW_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
                pages.push(std::mem::replace(&mut page, Content::new()).finish());
                y = MARGIN;
                draw_row(&mut page, label_width, y, &self.headings.label, &self.headings.duration);
                y += ROW_HEIGHT;
            }
            draw_row(&mut page, label_width, y, label, duration);
            y += ROW_HEIGHT;
        }
        pages.push(page.finish());

        assemble(&pages)
    }

    #[allow(clippy::cast_precision_loss)]
    fn label_column_width(&self) -> f32 {
        let longest = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .chain(std::iter::once(self.headings.label.chars().count()))
            .max()
            .unwrap_or(0);
        let available = PAGE_WIDTH - 2.0 * MARGIN - DURATION_WIDTH;
        (longest as f32 * LABEL_WIDTH_PER_CHAR)
            .max(DURATION_WIDTH)
            .min(available)
    }
}

fn draw_row(content: &mut Content, label_width: f32, y: f32, label: &str, duration: &str) {
    draw_cell(content, MARGIN, y, label_width, label);
    draw_cell(content, MARGIN + label_width, y, DURATION_WIDTH, duration);
}

/// Draw a bordered cell whose top-left corner is at (`x`, `y`) mm from the
/// top-left of the page, with left-aligned, vertically centred text.
fn draw_cell(content: &mut Content, x: f32, y: f32, width: f32, text: &str) {
    content
        .set_line_width(0.2 * MM)
        .rect(
            x * MM,
            (PAGE_HEIGHT - y - ROW_HEIGHT) * MM,
            width * MM,
            ROW_HEIGHT * MM,
        )
        .stroke();
    show_text(content, BODY_FONT_SIZE, x + CELL_PADDING, y, text);
}

/// Show `text` vertically centred in a row whose top edge is `y` mm from
/// the top of the page.
fn show_text(content: &mut Content, size: f32, x: f32, y: f32, text: &str) {
    let baseline = PAGE_HEIGHT * MM - (y + ROW_HEIGHT / 2.0) * MM - 0.3 * size;
    let encoded = encode_win_ansi(text);
    content
        .begin_text()
        .set_font(FONT, size)
        .next_line(x * MM, baseline)
        .show(Str(&encoded))
        .end_text();
}

/// Width of `text` in millimetres when set in Helvetica at `size` points.
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .iter()
        .map(|&byte| {
            let width = byte
                .checked_sub(b' ')
                .and_then(|index| HELVETICA_WIDTHS.get(usize::from(index)))
                .copied()
                .unwrap_or(DEFAULT_WIDTH);
            u32::from(width)
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let units = units as f32;
    units * size / 1000.0 / MM
}

/// Encode text for `WinAnsiEncoding`. Latin-1 maps directly; anything else
/// becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) if !(0x80..0xA0).contains(&byte) => byte,
            _ => b'?',
        })
        .collect()
}

/// Build the document around rendered page content streams.
fn assemble(pages: &[Vec<u8>]) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let mut next_id = Ref::new(4);
    let page_ids: Vec<(Ref, Ref)> = pages
        .iter()
        .map(|_| (next_id.bump(), next_id.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (&(page_id, content_id), content) in page_ids.iter().zip(pages) {
        {
            let mut page = pdf.page(page_id);
            page.parent(page_tree_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH * MM, PAGE_HEIGHT * MM))
                .contents(content_id);
            page.resources().fonts().pair(FONT, font_id);
        }
        pdf.stream(content_id, content);
    }

    pdf.finish()
}

impl<W: Write> ReportWriter for PdfWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        // The header row is drawn with the table on finalize.
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.rows.push((row.label.clone(), row.duration.clone()));
        Ok(())
    }

    fn finalize(&mut self, _summary: &ReportSummary) -> Result<()> {
        let document = self.render();
        self.writer
            .write_all(&document)
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::PdfWrite {
                path: self.path.clone(),
                source: e,
            })
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

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn render(text: &str) -> Vec<u8> {
        let report = parse(text);
        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new(&mut buffer, PathBuf::from("-"), headings());
            write_report(&mut writer, &report).unwrap();
        }
        buffer
    }

    #[test]
    fn test_pdf_contains_title_and_rows() {
        let text = "1 1 Vox_take_02.wav 00:00:00:00 00:00:10:00\n\
                    2 1 Bass.wav 00:00:00:00 01:00:00:00\n";
        let pdf = render(text);

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, b"(session - Musikrapport)"));
        assert!(contains(&pdf, b"(Ljudfil)"));
        for label in ["Vox take", "Bass", "Total Duration"] {
            assert!(contains(&pdf, format!("({label})").as_bytes()), "{label}");
        }
        for duration in ["00:00:10", "01:00:00", "01:00:10"] {
            assert!(contains(&pdf, format!("({duration})").as_bytes()), "{duration}");
        }
        assert!(contains(&pdf, b"/Count 1"));
    }

    #[test]
    fn test_pdf_breaks_long_reports_across_pages() {
        let text: String = (0..60)
            .map(|i| format!("1 {i} Source{i}.wav 00:00:00:00 00:00:01:00\n"))
            .collect();
        let pdf = render(&text);

        assert!(contains(&pdf, b"/Count 3"));
        assert!(contains(&pdf, b"(Source59)"));
        assert!(contains(&pdf, b"(Total Duration)"));
    }

    #[test]
    fn test_pdf_file_written() {
        let file = NamedTempFile::new().unwrap();
        let sink = std::fs::File::create(file.path()).unwrap();
        let mut writer = PdfWriter::new(sink, file.path().to_path_buf(), headings());
        write_report(&mut writer, &parse("")).unwrap();
        drop(writer);

        let bytes = std::fs::read(file.path()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"(Total Duration)"));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Längd"), b"L\xE4ngd");
        assert_eq!(encode_win_ansi("a\u{2013}b"), b"a?b");
    }

    #[test]
    fn test_text_width() {
        // "IL" = 278 + 556 units.
        let width = text_width("IL", 10.0);
        assert!((width - 8.34 / MM).abs() < 1e-4);
    }
}
