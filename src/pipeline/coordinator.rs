//! Input collection and output planning.

use crate::config::OutputFormat;
use crate::constants::report::STDIN_NAME;
use crate::constants::{INPUT_EXTENSIONS, STDIN_PATH, output_extensions};
use crate::error::Result;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where a session export is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Name used for report titles and output file names: the file stem,
    /// or `stdin`.
    pub fn source_name(&self) -> Cow<'_, str> {
        match self {
            Self::Stdin => Cow::Borrowed(STDIN_NAME),
            // Non-UTF-8 file names are rendered lossily
            Self::File(path) => path
                .file_stem()
                .map_or(Cow::Borrowed("output"), |s| s.to_string_lossy()),
        }
    }

    /// Path of the input file, if it is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Result of checking whether an input should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// Input should be processed.
    Process,
    /// Skip - every requested output already exists.
    SkipExists,
}

/// Determine the output directory for an input.
///
/// Reports go next to the input file unless an explicit directory is
/// given. Standard input writes to the current directory.
pub fn output_dir_for(input: &InputSource, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .path()
                .and_then(Path::parent)
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Get output file path for a given format.
pub fn output_path_for(input: &InputSource, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.source_name();

    let extension = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
        OutputFormat::Table => output_extensions::TABLE,
        OutputFormat::Pdf => output_extensions::PDF,
    };

    output_dir.join(format!("{stem}{extension}"))
}

/// Check if an input should be processed.
pub fn should_process(
    input: &InputSource,
    output_dir: &Path,
    formats: &[OutputFormat],
    force: bool,
) -> ProcessCheck {
    if force || matches!(input, InputSource::Stdin) {
        return ProcessCheck::Process;
    }

    let all_exist = formats
        .iter()
        .all(|fmt| output_path_for(input, output_dir, *fmt).exists());
    if all_exist {
        ProcessCheck::SkipExists
    } else {
        ProcessCheck::Process
    }
}

/// Collect inputs from paths (files, directories, or `-` for stdin).
///
/// Files named explicitly are always taken; directories are searched
/// recursively for session exports. Directory entries are sorted so runs
/// are repeatable.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<InputSource>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.as_os_str() == STDIN_PATH {
            if !inputs.contains(&InputSource::Stdin) {
                inputs.push(InputSource::Stdin);
            }
        } else if path.is_file() {
            inputs.push(InputSource::File(path.clone()));
        } else if path.is_dir() {
            let mut files = Vec::new();
            collect_exports_recursive(path, &mut files)?;
            files.sort();
            inputs.extend(files.into_iter().map(InputSource::File));
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(inputs)
}

/// Recursively collect session exports from a directory.
fn collect_exports_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_exports_recursive(&path, files)?;
        } else if is_session_export(&path) && !is_report_output(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file looks like a session export.
fn is_session_export(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        INPUT_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    })
}

/// Check if a file is one of our own table reports, which share the
/// `.txt` extension with exports.
fn is_report_output(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(output_extensions::TABLE))
}
