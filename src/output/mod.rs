//! Report output writers.

mod csv;
mod json;
mod pdf;
mod table;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonReport, JsonReportWriter, JsonRow, JsonSummary};
pub use pdf::PdfWriter;
pub use table::TableWriter;
pub use types::ReportHeadings;
pub use writer::{ReportWriter, write_report};
