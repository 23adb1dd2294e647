//! Participant list extraction from free text and `.xlsx` spreadsheets.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use log::{error, info, warn};
use thiserror::Error;

/// Values below the header row still treated as a heading.
const HEADER_WORDS: &[&str] = &[
    "name",
    "names",
    "participant",
    "participant name",
    "participants",
    "participant names",
    "full name",
    "attendee",
    "attendees",
];

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("failed to open workbook: {0}")]
    Open(#[source] XlsxError),
    #[error("failed to read first worksheet: {0}")]
    Sheet(#[source] XlsxError),
    #[error("workbook has no worksheets")]
    NoSheet,
}

/// Split manually typed attendance into names: one per line, or several per
/// line separated by commas.
pub fn parse_attendance_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_header(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    HEADER_WORDS.contains(&lowered.as_str())
}

/// Read names from column A of the first worksheet.
pub fn read_attendance_column(path: &Path) -> Result<Vec<String>, AttendanceError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(AttendanceError::Open)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(AttendanceError::NoSheet)?
        .map_err(AttendanceError::Sheet)?;

    // Ranges are trimmed to the used area; anything not starting in column A
    // has no first column to read.
    let first_row = match range.start() {
        Some((row, 0)) => row,
        Some(_) | None => return Ok(Vec::new()),
    };

    let mut values = Vec::new();
    for (offset, row) in range.rows().enumerate() {
        let cell = match row.first() {
            Some(cell) => cell,
            None => continue,
        };
        match cell {
            Data::Empty => {}
            Data::Error(e) => warn!(
                "Skipping attendance row {}: cell error {:?}",
                first_row as usize + offset + 1,
                e
            ),
            other => values.push(other.to_string()),
        }
    }

    Ok(strip_header(values))
}

/// Row 1 is always the column heading. A heading-like value right below it
/// (a second title row) is dropped as well.
fn strip_header(values: Vec<String>) -> Vec<String> {
    let mut values = values.into_iter().skip(1).peekable();
    if values.peek().map(|v| is_header(v)).unwrap_or(false) {
        values.next();
    }

    values
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Best-effort variant of [`read_attendance_column`]: failures are logged and
/// produce an empty list.
pub fn parse_attendance_excel(path: &Path) -> Vec<String> {
    match read_attendance_column(path) {
        Ok(names) => {
            info!(
                "Parsed {} participant(s) from {}",
                names.len(),
                path.display()
            );
            names
        }
        Err(e) => {
            error!("Error parsing attendance spreadsheet {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Spreadsheet names win whenever the spreadsheet produced any.
pub fn resolve_attendance(manual: Vec<String>, spreadsheet: Option<Vec<String>>) -> Vec<String> {
    match spreadsheet {
        Some(names) if !names.is_empty() => names,
        _ => manual,
    }
}
