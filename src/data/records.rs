//! In-memory records exchanged with the spreadsheet collaborators.
//! Students and staff are immutable after load; results flow back out as
//! ordered assignment records plus a per-staff summary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub class: String,
    /// Placement site.
    pub institution: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

impl Student {
    /// Postal form used for geocoding: "street, postal city".
    pub fn full_address(&self) -> String {
        format!("{}, {} {}", self.street, self.postal_code, self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    pub home_postal: String,
    /// Class labels this staff member teaches.
    pub classes: Vec<String>,
    /// Desired number of supervised placements; the hard cap is target + 1.
    pub target_caseload: usize,
}

impl StaffMember {
    pub fn teaches(&self, class: &str) -> bool {
        self.classes.iter().any(|taught| taught == class)
    }

    /// Geocoding form for the home location; only the postal code is on file.
    pub fn home_address(&self, country: &str) -> String {
        format!("{}, {}", self.home_postal, country)
    }

    /// Parse the comma-delimited class list from a worksheet cell.
    pub fn parse_classes(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One committed pairing, in the order the engine committed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub student: String,
    pub class: String,
    pub institution: String,
    pub address: String,
    pub staff: String,
    pub score: f64,
    /// " | "-joined trace of every scoring term that fired.
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffSummary {
    pub staff: String,
    pub assigned_count: usize,
    pub distinct_institutions: usize,
}
