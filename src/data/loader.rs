//! Load student and staff rosters from .xlsx workbooks.
//!
//! The first sheet is used; its first row is the header. Column names are
//! matched case-insensitively. Rows with an empty Name cell are skipped
//! (trailing blank rows are common in hand-maintained sheets).

use std::fmt;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::data::records::{StaffMember, Student};

pub const STUDENT_COLUMNS: &[&str] =
    &["Name", "Class", "Institution", "Street", "PostalCode", "City"];
pub const STAFF_COLUMNS: &[&str] = &["Name", "HomePostalCode", "Classes", "TargetCaseload"];

#[derive(Debug)]
pub enum LoadError {
    Workbook(String),
    EmptySheet(String),
    MissingColumns { path: String, columns: Vec<String> },
    BadCell { path: String, row: usize, column: String, detail: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workbook(detail) => write!(f, "failed to open workbook: {detail}"),
            Self::EmptySheet(path) => write!(f, "no data rows in {path}"),
            Self::MissingColumns { path, columns } => {
                write!(f, "missing columns in {path}: {}", columns.join(", "))
            }
            Self::BadCell { path, row, column, detail } => {
                write!(f, "bad cell in {path} row {row}, column {column}: {detail}")
            }
        }
    }
}

pub fn load_students(path: &Path) -> Result<Vec<Student>, LoadError> {
    let range = first_sheet(path)?;
    students_from_range(&range, &path.display().to_string())
}

pub fn load_staff(path: &Path) -> Result<Vec<StaffMember>, LoadError> {
    let range = first_sheet(path)?;
    staff_from_range(&range, &path.display().to_string())
}

/// Report which of `required` columns the workbook's header is missing.
pub fn check_columns(path: &Path, required: &[&str]) -> Result<Vec<String>, LoadError> {
    let range = first_sheet(path)?;
    let header = header_row(&range, &path.display().to_string())?;
    Ok(missing_columns(&header, required))
}

fn first_sheet(path: &Path) -> Result<Range<Data>, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|err| LoadError::Workbook(err.to_string()))?;
    let names = workbook.sheet_names();
    let sheet = names
        .first()
        .cloned()
        .ok_or_else(|| LoadError::EmptySheet(path.display().to_string()))?;
    workbook
        .worksheet_range(&sheet)
        .map_err(|err| LoadError::Workbook(err.to_string()))
}

fn header_row(range: &Range<Data>, path: &str) -> Result<Vec<String>, LoadError> {
    range
        .rows()
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .ok_or_else(|| LoadError::EmptySheet(path.to_string()))
}

fn missing_columns(header: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !header.iter().any(|cell| cell.eq_ignore_ascii_case(name)))
        .map(|name| name.to_string())
        .collect()
}

/// Map required column names to their indices, or fail listing every absent
/// column at once.
fn column_indices(
    header: &[String],
    required: &[&str],
    path: &str,
) -> Result<Vec<usize>, LoadError> {
    let missing = missing_columns(header, required);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_string(),
            columns: missing,
        });
    }
    Ok(required
        .iter()
        .map(|name| {
            header
                .iter()
                .position(|cell| cell.eq_ignore_ascii_case(name))
                .expect("column present after missing-column check")
        })
        .collect())
}

pub(crate) fn students_from_range(
    range: &Range<Data>,
    path: &str,
) -> Result<Vec<Student>, LoadError> {
    let header = header_row(range, path)?;
    let idx = column_indices(&header, STUDENT_COLUMNS, path)?;

    let mut students = Vec::new();
    for row in range.rows().skip(1) {
        let name = cell_at(row, idx[0]);
        if name.is_empty() {
            continue;
        }
        students.push(Student {
            name,
            class: cell_at(row, idx[1]),
            institution: cell_at(row, idx[2]),
            street: cell_at(row, idx[3]),
            postal_code: cell_at(row, idx[4]),
            city: cell_at(row, idx[5]),
        });
    }
    Ok(students)
}

pub(crate) fn staff_from_range(
    range: &Range<Data>,
    path: &str,
) -> Result<Vec<StaffMember>, LoadError> {
    let header = header_row(range, path)?;
    let idx = column_indices(&header, STAFF_COLUMNS, path)?;

    let mut members = Vec::new();
    for (row_number, row) in range.rows().enumerate().skip(1) {
        let name = cell_at(row, idx[0]);
        if name.is_empty() {
            continue;
        }
        let target = cell_usize(row, idx[3]).ok_or_else(|| LoadError::BadCell {
            path: path.to_string(),
            row: row_number + 1,
            column: "TargetCaseload".to_string(),
            detail: format!(
                "expected a non-negative integer, got '{}'",
                cell_at(row, idx[3])
            ),
        })?;
        members.push(StaffMember {
            name,
            home_postal: cell_at(row, idx[1]),
            classes: StaffMember::parse_classes(&cell_at(row, idx[2])),
            target_caseload: target,
        });
    }
    Ok(members)
}

fn cell_at(row: &[Data], idx: usize) -> String {
    row.get(idx).map(cell_text).unwrap_or_default()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        // Spreadsheet editors deliver postal codes and counts as floats;
        // render integral values without the decimal point.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => format!("{f}"),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => format!("{other:?}"),
    }
}

fn cell_usize(row: &[Data], idx: usize) -> Option<usize> {
    match row.get(idx)? {
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as usize),
        Data::Int(i) if *i >= 0 => Some(*i as usize),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
