//! CSV batch file sink and UTC timestamp helpers.
//!
//! Results accumulate in one CSV per testing session: the header is written
//! when the file is created and every tested drive appends one row, so a
//! crash mid-batch loses at most the drive being written.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use drivetriage_core::ReportRow;

/// Append-only CSV sink with header-on-create.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one result row, writing the header first if the file is new.
    pub fn append(&self, row: &ReportRow) -> io::Result<()> {
        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        if is_new {
            writeln!(file, "{}", ReportRow::header_line())?;
        }
        writeln!(file, "{}", row.to_csv_line())?;
        file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// UTC timestamps
// ---------------------------------------------------------------------------

/// Current UTC time for the row's timestamp column.
/// Example: `2026-08-06 12:30:00`
pub fn timestamp() -> String {
    format_timestamp(unix_secs_now())
}

/// Current UTC time in a filename-safe form.
/// Example: `20260806_123000`
pub fn timestamp_compact() -> String {
    format_timestamp_compact(unix_secs_now())
}

fn unix_secs_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

fn format_timestamp(secs: u64) -> String {
    let (year, month, day, hour, min, sec) = secs_to_utc(secs);
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}")
}

fn format_timestamp_compact(secs: u64) -> String {
    let (year, month, day, hour, min, sec) = secs_to_utc(secs);
    format!("{year:04}{month:02}{day:02}_{hour:02}{min:02}{sec:02}")
}

/// Convert seconds since Unix epoch to (year, month, day, hour, minute,
/// second) UTC. Simple implementation, no leap second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;

    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let months_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 0u64;
    for (i, &md) in months_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }
    let day = days + 1;

    (year, month, day, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
