//! Statement date recovery from export filenames.
//!
//! The export body never carries a parsed as-of date; the download name
//! does: `Statement<digits>.csv`, where the digit run concatenates month,
//! day, and four-digit year with no separators. Only the month varies in
//! width:
//!   7 digits: M DD YYYY   (`Statement1312026.csv`  is 2026-01-31)
//!   8 digits: MM DD YYYY  (`Statement10122026.csv` is 2026-10-12)
//! Every other run length is an error, as is a run naming an impossible
//! calendar date.

use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Result, StatementError};

fn stem_re() -> &'static Regex {
    // [0-9] rather than \d: the captured run is byte-sliced below, so it
    // must stay ASCII (\d matches any Unicode decimal digit).
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Statement([0-9]+)$").expect("statement stem regex"))
}

/// Resolve a statement's as-of date from its filename.
pub fn statement_date_from_path(path: impl AsRef<Path>) -> Result<NaiveDate> {
    let path = path.as_ref();
    let unrecognized = || StatementError::UnrecognizedFilenameDate {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(unrecognized)?;
    let caps = stem_re().captures(stem).ok_or_else(unrecognized)?;
    let digits = &caps[1];

    let (month, day, year) = match digits.len() {
        7 => (&digits[..1], &digits[1..3], &digits[3..]),
        8 => (&digits[..2], &digits[2..4], &digits[4..]),
        _ => return Err(unrecognized()),
    };

    // All-digit slices of at most four characters; parse cannot overflow.
    let month: u32 = month.parse().map_err(|_| unrecognized())?;
    let day: u32 = day.parse().map_err(|_| unrecognized())?;
    let year: i32 = year.parse().map_err(|_| unrecognized())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(unrecognized)
}
