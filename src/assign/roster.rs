//! Append-only ledger of committed supervision pairings.

use std::collections::{HashMap, HashSet};

/// Staff name → insertion-ordered (student, institution) pairs.
/// The ledger only grows; the engine never unwinds a commitment.
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    by_staff: HashMap<String, Vec<(String, String)>>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assigned_count(&self, staff: &str) -> usize {
        self.by_staff.get(staff).map_or(0, Vec::len)
    }

    /// Whether `staff` already supervises at least one student at `institution`.
    pub fn supervises_at(&self, staff: &str, institution: &str) -> bool {
        self.by_staff
            .get(staff)
            .is_some_and(|pairs| pairs.iter().any(|(_, site)| site == institution))
    }

    pub fn record(&mut self, staff: &str, student: &str, institution: &str) {
        self.by_staff
            .entry(staff.to_string())
            .or_default()
            .push((student.to_string(), institution.to_string()));
    }

    /// Committed pairs for `staff`, in commit order.
    pub fn pairs(&self, staff: &str) -> &[(String, String)] {
        self.by_staff.get(staff).map_or(&[], Vec::as_slice)
    }

    pub fn distinct_institutions(&self, staff: &str) -> usize {
        self.by_staff.get(staff).map_or(0, |pairs| {
            pairs
                .iter()
                .map(|(_, site)| site.as_str())
                .collect::<HashSet<_>>()
                .len()
        })
    }

    pub fn total_assigned(&self) -> usize {
        self.by_staff.values().map(Vec::len).sum()
    }
}
