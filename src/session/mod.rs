//! Session export parsing and duration totals.
//!
//! Turns the text of an audio-editing session export into a report of how
//! long each source file is used, summed over every clip placed from it.
//! The pipeline is pure: [`parse`] does no I/O and keeps no state between
//! calls.

mod aggregate;
mod extract;
mod normalize;
mod report;
mod timecode;

pub use aggregate::Aggregate;
pub use extract::{ClipMatch, ClipRecord, extract_clips};
pub use normalize::normalize_clip_name;
pub use report::{Report, ReportRow, ReportSummary, parse};
pub use timecode::{format_duration, timecode_to_seconds};
