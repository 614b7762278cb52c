//! Spreadsheet collaborators: typed records, workbook ingestion, and CSV
//! output. The assignment core only ever sees the in-memory records.

pub mod export;
pub mod loader;
pub mod records;

pub use export::{default_output_name, summary_path, write_assignments, write_summary, ExportError};
pub use loader::{
    check_columns, load_staff, load_students, LoadError, STAFF_COLUMNS, STUDENT_COLUMNS,
};
pub use records::{AssignmentRecord, StaffMember, StaffSummary, Student};
