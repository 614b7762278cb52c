//! Write assignment results and the per-staff summary as CSV.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::data::records::{AssignmentRecord, StaffSummary};

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "failed to write csv: {err}"),
            Self::Io(err) => write!(f, "failed to flush output: {err}"),
        }
    }
}

pub fn write_assignments(path: &Path, records: &[AssignmentRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(ExportError::Csv)?;
    writer
        .write_record(["Student", "Class", "Institution", "Address", "Staff", "Score", "Rationale"])
        .map_err(ExportError::Csv)?;
    for record in records {
        let score = format!("{:.1}", record.score);
        writer
            .write_record([
                record.student.as_str(),
                record.class.as_str(),
                record.institution.as_str(),
                record.address.as_str(),
                record.staff.as_str(),
                score.as_str(),
                record.rationale.as_str(),
            ])
            .map_err(ExportError::Csv)?;
    }
    writer.flush().map_err(ExportError::Io)
}

pub fn write_summary(path: &Path, summaries: &[StaffSummary]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(ExportError::Csv)?;
    writer
        .write_record(["Staff", "AssignedCount", "DistinctInstitutions"])
        .map_err(ExportError::Csv)?;
    for summary in summaries {
        let assigned = summary.assigned_count.to_string();
        let distinct = summary.distinct_institutions.to_string();
        writer
            .write_record([summary.staff.as_str(), assigned.as_str(), distinct.as_str()])
            .map_err(ExportError::Csv)?;
    }
    writer.flush().map_err(ExportError::Io)
}

/// Default output filename: current year plus the sorted class labels,
/// e.g. `assignments_2026_FSP25a_FSP25c.csv`.
pub fn default_output_name(classes: &[String]) -> String {
    let year = chrono::Utc::now().year();
    if classes.is_empty() {
        format!("assignments_{year}.csv")
    } else {
        format!("assignments_{year}_{}.csv", classes.join("_"))
    }
}

/// Sibling path for the per-staff summary: `<stem>.summary.csv`.
pub fn summary_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("assignments");
    out.with_file_name(format!("{stem}.summary.csv"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{default_output_name, summary_path, write_assignments, write_summary};
    use crate::data::records::{AssignmentRecord, StaffSummary};

    fn unique_temp_path(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("praktika-{name}-{stamp}.csv"))
    }

    #[test]
    fn writes_assignments_in_order() {
        let path = unique_temp_path("assignments");
        let records = vec![
            AssignmentRecord {
                student: "Mia K.".to_string(),
                class: "FSP25a".to_string(),
                institution: "Kita Sonnenschein".to_string(),
                address: "Lindenweg 12, 24768 Rendsburg".to_string(),
                staff: "BedbA".to_string(),
                score: 115.0,
                rationale: "teaches FSP25a | load 0/4 (+20)".to_string(),
            },
            AssignmentRecord {
                student: "Lena B.".to_string(),
                class: "FSP25c".to_string(),
                institution: "Kita Regenbogen".to_string(),
                address: "Am Markt 1, 24782 Büdelsdorf".to_string(),
                staff: "GrotK".to_string(),
                score: 70.5,
                rationale: "load 0/3 (+15)".to_string(),
            },
        ];

        write_assignments(&path, &records).expect("should write");
        let content = fs::read_to_string(&path).expect("should read back");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Student,Class,Institution"));
        assert!(lines[1].contains("Mia K."));
        assert!(lines[1].contains("115.0"));
        assert!(lines[2].contains("Lena B."));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn writes_summary_rows() {
        let path = unique_temp_path("summary");
        let summaries = vec![StaffSummary {
            staff: "BedbA".to_string(),
            assigned_count: 3,
            distinct_institutions: 2,
        }];

        write_summary(&path, &summaries).expect("should write");
        let content = fs::read_to_string(&path).expect("should read back");
        assert!(content.contains("BedbA,3,2"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn default_name_includes_classes() {
        let name = default_output_name(&["FSP25a".to_string(), "FSP25c".to_string()]);
        assert!(name.starts_with("assignments_"));
        assert!(name.ends_with("_FSP25a_FSP25c.csv"));
        assert!(default_output_name(&[]).ends_with(".csv"));
    }

    #[test]
    fn summary_path_is_a_sibling() {
        let path = summary_path(std::path::Path::new("out/assignments_2026.csv"));
        assert_eq!(
            path,
            std::path::Path::new("out/assignments_2026.summary.csv")
        );
    }
}
