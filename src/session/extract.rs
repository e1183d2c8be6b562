//! Clip extraction from raw session export text.
//!
//! A clip placement is recognised by the following grammar, matched
//! anywhere in the text (not anchored to line boundaries):
//!
//! ```text
//! clip      = int ws int ws label ws timecode ws timecode
//! int       = digit+
//! ws        = (whitespace | U+001C..U+001F)+
//! label     = (any char except newline)+        ; shortest that still matches
//! timecode  = digit+ ":" digit+ ":" digit+ ":" frames
//! frames    = digit+                            ; matched, then discarded
//! ```
//!
//! Matches are found leftmost-first and never overlap. Because `label` is
//! the shortest run that still reaches a timecode pair, extra columns
//! sitting between the clip name and the first timecode end up inside the
//! label, while columns after the second timecode (duration, state) are
//! ignored.

use regex::Regex;
use std::sync::LazyLock;

use super::timecode::timecode_to_seconds;

/// One or more digits.
const INT: &str = r"\d+";
/// One or more whitespace characters, newlines and the ASCII information
/// separators included.
const WS: &str = r"[\s\x1C-\x1F]+";
/// Non-greedy label; `.` never crosses a newline.
const LABEL: &str = r".+?";
/// The `HH:MM:SS` part of a timecode.
const HMS: &str = r"\d+:\d+:\d+";
/// The frame suffix of a timecode.
const FRAMES: &str = r":\d+";

#[allow(clippy::expect_used)]
static CLIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "(?P<channel>{INT}){WS}(?P<event>{INT}){WS}(?P<label>{LABEL}){WS}\
         (?P<start>{HMS}){FRAMES}{WS}(?P<end>{HMS}){FRAMES}"
    );
    Regex::new(&pattern).expect("clip grammar compiles")
});

/// A clip placement as it appears in the export, before any interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipMatch<'a> {
    /// First leading integer (channel/track). Not used downstream.
    pub channel: &'a str,
    /// Second leading integer (event number). Not used downstream.
    pub event: &'a str,
    /// Clip label exactly as written.
    pub raw_name: &'a str,
    /// Start timecode without frames (`HH:MM:SS`).
    pub start: &'a str,
    /// End timecode without frames (`HH:MM:SS`).
    pub end: &'a str,
}

impl<'a> ClipMatch<'a> {
    /// Convert both timecodes to whole seconds.
    ///
    /// Returns `None` if a timecode cannot be represented in seconds.
    pub fn to_record(&self) -> Option<ClipRecord<'a>> {
        Some(ClipRecord {
            raw_name: self.raw_name,
            start_seconds: timecode_to_seconds(self.start)?,
            end_seconds: timecode_to_seconds(self.end)?,
        })
    }
}

/// A placed clip with its timecodes resolved to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRecord<'a> {
    /// Clip label exactly as written.
    pub raw_name: &'a str,
    /// Start position in whole seconds.
    pub start_seconds: i64,
    /// End position in whole seconds.
    pub end_seconds: i64,
}

impl ClipRecord<'_> {
    /// Length of the clip in seconds. Negative when the end precedes the start.
    pub const fn duration_seconds(&self) -> i64 {
        self.end_seconds.saturating_sub(self.start_seconds)
    }
}

/// Iterate over every clip placement in `text`, in order of appearance.
pub fn extract_clips(text: &str) -> impl Iterator<Item = ClipMatch<'_>> {
    CLIP_PATTERN.captures_iter(text).filter_map(|caps| {
        Some(ClipMatch {
            channel: caps.name("channel")?.as_str(),
            event: caps.name("event")?.as_str(),
            raw_name: caps.name("label")?.as_str(),
            start: caps.name("start")?.as_str(),
            end: caps.name("end")?.as_str(),
        })
    })
}
