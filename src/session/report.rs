//! Report assembly: the full parse pipeline from export text to rows.

use tracing::{debug, trace};

use super::aggregate::Aggregate;
use super::extract::extract_clips;
use super::normalize::normalize_clip_name;
use super::timecode::format_duration;
use crate::constants::session::{GROUP_MARKER, TOTAL_LABEL};

/// One line of the duration report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Normalized source name, or the total label for the last row.
    pub label: String,
    /// Duration formatted as `HH:MM:SS`.
    pub duration: String,
    /// Duration in whole seconds.
    pub seconds: i64,
}

impl ReportRow {
    fn new(label: impl Into<String>, seconds: i64) -> Self {
        Self {
            label: label.into(),
            duration: format_duration(seconds),
            seconds,
        }
    }
}

/// Counters collected while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Clip placements recognised in the text.
    pub clips_matched: usize,
    /// Group/container clips left out of the totals.
    pub group_clips_skipped: usize,
    /// Clips whose timecodes could not be converted to seconds.
    pub clips_unreadable: usize,
    /// Distinct normalized source names.
    pub sources: usize,
    /// Sum of all counted clip durations.
    pub total_seconds: i64,
}

/// Per-source duration report.
///
/// Rows appear in the order each source was first seen in the export,
/// followed by a single total row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
    summary: ReportSummary,
}

impl Report {
    /// All rows, the total row last.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Rows for individual sources, without the total row.
    pub fn source_rows(&self) -> &[ReportRow] {
        &self.rows[..self.rows.len() - 1]
    }

    /// The trailing total row.
    pub fn total_row(&self) -> &ReportRow {
        &self.rows[self.rows.len() - 1]
    }

    /// Parse counters.
    pub const fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// Rows as `(label, duration)` pairs.
    pub fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.rows
            .iter()
            .map(|row| (row.label.as_str(), row.duration.as_str()))
            .collect()
    }
}

/// Parse a session export and total clip durations per source.
///
/// Never fails: text that contains no recognisable clips produces a report
/// holding only the total row at `00:00:00`.
pub fn parse(text: &str) -> Report {
    let mut aggregate = Aggregate::new();
    let mut summary = ReportSummary::default();
    let mut total_seconds: i64 = 0;

    for clip in extract_clips(text) {
        summary.clips_matched += 1;

        if clip.raw_name.contains(GROUP_MARKER) {
            trace!("Skipping group clip: {}", clip.raw_name);
            summary.group_clips_skipped += 1;
            continue;
        }

        let Some(record) = clip.to_record() else {
            debug!(
                "Skipping clip with unreadable timecodes: {} ({} - {})",
                clip.raw_name, clip.start, clip.end
            );
            summary.clips_unreadable += 1;
            continue;
        };

        let duration = record.duration_seconds();
        if duration < 0 {
            debug!(
                "Clip ends before it starts, counting {duration}s: {}",
                record.raw_name
            );
        }

        total_seconds = total_seconds.saturating_add(duration);
        aggregate.add(normalize_clip_name(record.raw_name), duration);
    }

    summary.sources = aggregate.len();
    summary.total_seconds = total_seconds;

    let mut rows: Vec<ReportRow> = aggregate
        .iter()
        .map(|(key, seconds)| ReportRow::new(key, seconds))
        .collect();
    rows.push(ReportRow::new(TOTAL_LABEL, total_seconds));

    debug!(
        "Parsed {} clip(s) into {} source(s), {} group clip(s) skipped",
        summary.clips_matched, summary.sources, summary.group_clips_skipped
    );

    Report { rows, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clip() {
        let report = parse("1 2 Drums_Loop-03.wav 00:00:10:00 00:00:25:00");
        assert_eq!(
            report.as_pairs(),
            vec![("Drums Loop", "00:00:15"), ("Total Duration", "00:00:15")]
        );
    }

    #[test]
    fn test_group_clip_filtered() {
        let report = parse("1 2 FX_Hit_GRP.grp 00:01:00:00 00:01:05:00");
        assert_eq!(report.as_pairs(), vec![("Total Duration", "00:00:00")]);
        assert_eq!(report.summary().clips_matched, 1);
        assert_eq!(report.summary().group_clips_skipped, 1);
    }

    #[test]
    fn test_group_marker_is_case_sensitive() {
        let report = parse("1 2 Hits.GRP 00:00:00:00 00:00:05:00");
        assert_eq!(
            report.as_pairs(),
            vec![("Hits", "00:00:05"), ("Total Duration", "00:00:05")]
        );
    }

    #[test]
    fn test_takes_aggregate() {
        let text = "1 1 Vox_take_02.wav 00:00:00:00 00:00:10:00\n\
                    1 2 Vox-take-07.wav 00:00:10:00 00:00:30:00\n";
        let report = parse(text);
        assert_eq!(
            report.as_pairs(),
            vec![("Vox take", "00:00:30"), ("Total Duration", "00:00:30")]
        );
    }

    #[test]
    fn test_stems_label() {
        let report = parse("1 1 Guitar STEMS Mix Final.wav 00:00:00:00 00:00:03:00");
        assert_eq!(report.source_rows()[0].label, "Guitar");
    }

    #[test]
    fn test_empty_input() {
        let report = parse("");
        assert_eq!(report.as_pairs(), vec![("Total Duration", "00:00:00")]);
        assert!(report.source_rows().is_empty());
    }

    #[test]
    fn test_negative_duration_passes_through() {
        let report = parse("1 1 Hit.wav 00:00:20:00 00:00:05:00");
        assert_eq!(report.source_rows()[0].seconds, -15);
        assert_eq!(report.total_row().seconds, -15);
        assert_eq!(report.total_row().duration, "-1:59:45");
    }

    #[test]
    fn test_rows_in_first_seen_order() {
        let text = "1 1 Bass.wav 00:00:00:00 00:00:10:00\n\
                    2 1 Keys.wav 00:00:00:00 00:00:10:00\n\
                    1 2 Bass 02.wav 00:00:10:00 00:00:20:00\n\
                    3 1 Arp.wav 00:00:00:00 00:00:01:00\n";
        let report = parse(text);
        let labels: Vec<_> = report_labels(&report);
        assert_eq!(labels, vec!["Bass", "Keys", "Arp", "Total Duration"]);
    }

    #[test]
    fn test_hours_not_wrapped() {
        let report = parse("1 1 Drone.wav 00:00:00:00 30:00:00:00");
        assert_eq!(report.total_row().duration, "30:00:00");
    }

    #[test]
    fn test_unreadable_timecode_skipped() {
        let text = "1 1 Huge.wav 00:00:00:00 99999999999999999999:00:00:00\n\
                    1 2 Fine.wav 00:00:00:00 00:00:02:00\n";
        let report = parse(text);
        assert_eq!(report.summary().clips_unreadable, 1);
        assert_eq!(
            report.as_pairs(),
            vec![("Fine", "00:00:02"), ("Total Duration", "00:00:02")]
        );
    }

    fn report_labels(report: &Report) -> Vec<&str> {
        report.rows().iter().map(|row| row.label.as_str()).collect()
    }
}
