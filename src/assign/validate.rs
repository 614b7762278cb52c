//! Non-mutating post-pass check of final caseloads against targets.

use std::fmt;

use crate::assign::roster::RosterState;
use crate::data::records::StaffMember;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBand {
    /// Within target ± 1, the tolerated corridor.
    WithinTolerance,
    Under,
    Over,
}

impl LoadBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinTolerance => "within tolerance",
            Self::Under => "underloaded",
            Self::Over => "overloaded",
        }
    }
}

impl fmt::Display for LoadBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    pub staff: String,
    pub assigned: usize,
    pub target: usize,
    pub band: LoadBand,
}

impl LoadDiagnostic {
    pub fn deviation(&self) -> i64 {
        self.assigned as i64 - self.target as i64
    }
}

/// Classify every staff member's final count. Purely diagnostic; an `Over`
/// band would mean the engine violated its own hard cap.
pub fn check_caseloads(staff: &[StaffMember], roster: &RosterState) -> Vec<LoadDiagnostic> {
    staff
        .iter()
        .map(|member| {
            let assigned = roster.assigned_count(&member.name);
            let target = member.target_caseload;
            let band = if assigned + 1 < target {
                LoadBand::Under
            } else if assigned > target + 1 {
                LoadBand::Over
            } else {
                LoadBand::WithinTolerance
            };
            LoadDiagnostic {
                staff: member.name.clone(),
                assigned,
                target,
                band,
            }
        })
        .collect()
}

pub fn report_caseloads(diagnostics: &[LoadDiagnostic]) {
    for diag in diagnostics {
        match diag.band {
            LoadBand::WithinTolerance => println!(
                "  {}: {}/{} (deviation {:+})",
                diag.staff, diag.assigned, diag.target, diag.deviation()
            ),
            LoadBand::Under => eprintln!(
                "  {}: {}/{} (underloaded by {})",
                diag.staff, diag.assigned, diag.target, -diag.deviation()
            ),
            LoadBand::Over => eprintln!(
                "  {}: {}/{} (OVERLOADED by {})",
                diag.staff, diag.assigned, diag.target, diag.deviation()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_caseloads, LoadBand};
    use crate::assign::roster::RosterState;
    use crate::data::records::StaffMember;

    fn staff(name: &str, target: usize) -> StaffMember {
        StaffMember {
            name: name.to_string(),
            home_postal: "24768".to_string(),
            classes: vec!["FSP25a".to_string()],
            target_caseload: target,
        }
    }

    #[test]
    fn classifies_bands_around_target() {
        let members = vec![
            staff("Exact", 2),
            staff("OneUnder", 2),
            staff("FarUnder", 4),
            staff("OneOver", 2),
        ];
        let mut roster = RosterState::new();
        for i in 0..2 {
            roster.record("Exact", &format!("E{i}"), "Site");
        }
        roster.record("OneUnder", "U0", "Site");
        roster.record("FarUnder", "F0", "Site");
        for i in 0..3 {
            roster.record("OneOver", &format!("O{i}"), "Site");
        }

        let diagnostics = check_caseloads(&members, &roster);
        assert_eq!(diagnostics[0].band, LoadBand::WithinTolerance);
        assert_eq!(diagnostics[1].band, LoadBand::WithinTolerance);
        assert_eq!(diagnostics[2].band, LoadBand::Under);
        assert_eq!(diagnostics[2].deviation(), -3);
        assert_eq!(diagnostics[3].band, LoadBand::WithinTolerance);
    }

    #[test]
    fn over_band_requires_exceeding_the_hard_cap() {
        let members = vec![staff("Busy", 1)];
        let mut roster = RosterState::new();
        for i in 0..3 {
            roster.record("Busy", &format!("S{i}"), "Site");
        }
        let diagnostics = check_caseloads(&members, &roster);
        assert_eq!(diagnostics[0].band, LoadBand::Over);
        assert_eq!(diagnostics[0].deviation(), 2);
    }
}
