//! Clip label normalization.
//!
//! Session exports name clips after the audio file they came from, plus
//! whatever take numbers, separators and stem markers the editor added.
//! [`normalize_clip_name`] folds those variants onto one source key, so
//! `Vox_take_02.wav` and `Vox-take-07.wav` both become `Vox take`.

use regex::Regex;
use std::sync::LazyLock;

/// A digit token preceded by whitespace and followed by an extension or
/// trailing whitespace at the end of the label. The leading whitespace and
/// the tail are captured so only the digits are dropped.
#[allow(clippy::expect_used)]
static TRAILING_TAKE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<lead>[\s\x1C-\x1F])\d+(?P<tail>\.\w+|[\s\x1C-\x1F]*)$")
        .expect("take number pattern compiles")
});

#[allow(clippy::expect_used)]
static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w+$").expect("extension pattern compiles"));

#[allow(clippy::expect_used)]
static STEMS_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSTEMS\b.*").expect("stems pattern compiles"));

/// Normalize a raw clip label into the key its duration is totalled under.
///
/// The steps run in a fixed order, and reordering them changes results:
///
/// 1. `_` and `-` become spaces.
/// 2. A trailing take number (`Vox 02.wav`, `Vox 02`) is removed.
/// 3. A trailing file extension is removed.
/// 4. The word `STEMS` and everything after it is removed.
/// 5. Whitespace runs collapse to one space and the ends are trimmed.
///
/// Throughout, the ASCII information separators U+001C..U+001F count as
/// whitespace.
pub fn normalize_clip_name(raw_name: &str) -> String {
    let name = raw_name.replace(['_', '-'], " ");
    let name = TRAILING_TAKE_NUMBER.replace(&name, "${lead}${tail}");
    let name = FILE_EXTENSION.replace(&name, "");
    let name = STEMS_SUFFIX.replace(&name, "");
    name.split(is_label_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace for label purposes: Unicode whitespace plus the ASCII
/// information separators U+001C..U+001F.
fn is_label_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}
