//! Greedy allocation over live-rescored candidate pairs.
//!
//! Every iteration rescores all eligible (student, staff) pairs against the
//! current roster and commits the single best one. The rescoring is O(n·m)
//! per iteration by design: the continuity and caseload terms depend on the
//! roster, so scores computed against an older roster would be wrong.

use crate::assign::roster::RosterState;
use crate::assign::scoring::ScoringEngine;
use crate::data::records::{AssignmentRecord, StaffMember, Student};
use crate::geo::coords::Coord;
use crate::geo::travel::{Pacer, RoutingProvider};

/// Iteration cap multiplier; reaching it is treated like running out of
/// eligible pairs.
const MAX_ITERATIONS_PER_STUDENT: usize = 10;

/// A student together with their institution's resolved coordinate.
#[derive(Debug, Clone)]
pub struct ResolvedStudent {
    pub student: Student,
    pub coord: Option<Coord>,
}

#[derive(Debug)]
pub struct AssignmentOutcome {
    /// Committed pairings in commit order.
    pub records: Vec<AssignmentRecord>,
    /// Students left without a supervisor when no eligible pair remained.
    pub unplaced: Vec<String>,
    pub roster: RosterState,
    /// How many students exceed the total hard capacity, when any do.
    pub capacity_shortfall: Option<usize>,
}

pub struct AssignmentEngine<R, P> {
    scoring: ScoringEngine<R, P>,
}

impl<R: RoutingProvider, P: Pacer> AssignmentEngine<R, P> {
    pub fn new(scoring: ScoringEngine<R, P>) -> Self {
        Self { scoring }
    }

    pub fn run(
        &mut self,
        students: &[ResolvedStudent],
        staff: &[StaffMember],
    ) -> AssignmentOutcome {
        let capacity: usize = staff.iter().map(|member| member.target_caseload + 1).sum();
        let capacity_shortfall = students
            .len()
            .checked_sub(capacity)
            .filter(|shortfall| *shortfall > 0);
        if let Some(shortfall) = capacity_shortfall {
            eprintln!(
                "warning: hard capacity {capacity} is below {} students; \
                 {shortfall} may stay unplaced",
                students.len()
            );
        }

        let mut roster = RosterState::new();
        let mut records: Vec<AssignmentRecord> = Vec::new();
        let mut assigned = vec![false; students.len()];
        let max_iterations = students.len() * MAX_ITERATIONS_PER_STUDENT;
        let mut iterations = 0;

        while records.len() < students.len() && iterations < max_iterations {
            iterations += 1;

            // Best (score, student, staff, rationale) over all eligible pairs,
            // first encountered wins ties.
            let mut best: Option<(f64, usize, usize, String)> = None;
            for (s_idx, resolved) in students.iter().enumerate() {
                if assigned[s_idx] {
                    continue;
                }
                for (t_idx, member) in staff.iter().enumerate() {
                    if roster.assigned_count(&member.name) >= member.target_caseload + 1 {
                        continue;
                    }
                    let scored =
                        self.scoring
                            .score(member, &resolved.student, resolved.coord, &roster);
                    if best.as_ref().map_or(true, |(top, ..)| scored.value > *top) {
                        best = Some((scored.value, s_idx, t_idx, scored.rationale));
                    }
                }
            }

            let Some((score, s_idx, t_idx, rationale)) = best else {
                break;
            };

            let resolved = &students[s_idx];
            let member = &staff[t_idx];
            roster.record(&member.name, &resolved.student.name, &resolved.student.institution);
            assigned[s_idx] = true;

            records.push(AssignmentRecord {
                student: resolved.student.name.clone(),
                class: resolved.student.class.clone(),
                institution: resolved.student.institution.clone(),
                address: resolved.student.full_address(),
                staff: member.name.clone(),
                score,
                rationale,
            });
        }

        let unplaced: Vec<String> = students
            .iter()
            .zip(&assigned)
            .filter(|(_, done)| !**done)
            .map(|(resolved, _)| resolved.student.name.clone())
            .collect();
        if !unplaced.is_empty() {
            eprintln!("warning: {} student(s) could not be placed", unplaced.len());
            for name in &unplaced {
                eprintln!("  unplaced: {name}");
            }
        }

        AssignmentOutcome {
            records,
            unplaced,
            roster,
            capacity_shortfall,
        }
    }
}
