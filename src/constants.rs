//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "cliptally";

/// Input path that means "read from standard input".
pub const STDIN_PATH: &str = "-";

/// File extensions treated as session exports when scanning directories.
pub const INPUT_EXTENSIONS: &[&str] = &["txt"];

/// Session export parsing constants.
pub mod session {
    /// Label of the trailing grand-total row.
    pub const TOTAL_LABEL: &str = "Total Duration";

    /// Substring marking group/container clips, which are never counted.
    pub const GROUP_MARKER: &str = ".grp";
}

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV output extension.
    pub const CSV: &str = ".cliptally.csv";
    /// JSON output extension.
    pub const JSON: &str = ".cliptally.json";
    /// Plain-text table extension.
    pub const TABLE: &str = ".cliptally.txt";
    /// PDF report extension.
    pub const PDF: &str = ".cliptally.pdf";
}

/// Report presentation defaults.
pub mod report {
    /// Default header of the label column.
    pub const LABEL_HEADER: &str = "Ljudfil";
    /// Default header of the duration column.
    pub const DURATION_HEADER: &str = "Längd";
    /// Default suffix appended to the file stem in the table title.
    pub const TITLE_SUFFIX: &str = "Musikrapport";
    /// Title used when the report has no source file name (stdin).
    pub const STDIN_NAME: &str = "stdin";
}

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";
