//! Multi-term affinity scoring for (staff, student, roster) triples.
//!
//! Terms fire in a fixed order so rationale traces read the same way across
//! runs: class match, travel, regional affinity, institution continuity,
//! caseload balance. The arithmetic is order-independent; only the trace
//! text depends on it.

use std::collections::HashMap;

use crate::assign::detour::DetourCostModel;
use crate::assign::roster::RosterState;
use crate::config::{ScoringWeights, TravelThresholds};
use crate::data::records::{StaffMember, Student};
use crate::geo::coords::Coord;
use crate::geo::travel::{Pacer, RoutingProvider};

/// Bonus per unfilled slot below the target caseload.
const UNDER_TARGET_BONUS_STEP: f64 = 5.0;
/// Flat deduction when a staff member sits exactly at target, so colleagues
/// with open slots win ties.
const AT_TARGET_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub value: f64,
    pub rationale: String,
}

pub struct ScoringEngine<R, P> {
    weights: ScoringWeights,
    thresholds: TravelThresholds,
    regional_prefix: String,
    detour: DetourCostModel<R, P>,
    /// Staff name → home coordinate, resolved once before scoring begins.
    home_coords: HashMap<String, Option<Coord>>,
}

impl<R: RoutingProvider, P: Pacer> ScoringEngine<R, P> {
    pub fn new(
        weights: ScoringWeights,
        thresholds: TravelThresholds,
        regional_prefix: impl Into<String>,
        detour: DetourCostModel<R, P>,
        home_coords: HashMap<String, Option<Coord>>,
    ) -> Self {
        Self {
            weights,
            thresholds,
            regional_prefix: regional_prefix.into(),
            detour,
            home_coords,
        }
    }

    /// Score one candidate pairing against the live roster. Scores must be
    /// recomputed whenever the roster changes: the continuity and caseload
    /// terms read it directly.
    pub fn score(
        &mut self,
        staff: &StaffMember,
        student: &Student,
        institution: Option<Coord>,
        roster: &RosterState,
    ) -> ScoredPair {
        let mut value = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if staff.teaches(&student.class) {
            value += self.weights.class_match;
            reasons.push(format!("teaches {}", student.class));
        }

        let home = self.home_coords.get(&staff.name).copied().flatten();
        if home.is_some() && institution.is_some() {
            let minutes = self.detour.effective_round_trip(home, institution);

            if minutes <= self.thresholds.excellent_max_min {
                value += self.weights.travel_excellent;
                reasons.push(format!("travel {minutes:.1} min (excellent)"));
            } else if minutes <= self.thresholds.good_max_min {
                value += self.weights.travel_good;
                reasons.push(format!("travel {minutes:.1} min (good)"));
            } else if minutes <= self.thresholds.acceptable_max_min {
                value += self.weights.travel_acceptable;
                reasons.push(format!("travel {minutes:.1} min (acceptable)"));
            } else {
                reasons.push(format!("travel {minutes:.1} min (poor)"));
            }

            // The two penalty tiers stack: a very long trip is also a long one.
            if minutes > self.thresholds.long_min {
                value -= self.weights.travel_long_penalty;
                reasons.push(format!(
                    "over {} min (-{})",
                    self.thresholds.long_min, self.weights.travel_long_penalty
                ));
            }
            if minutes > self.thresholds.very_long_min {
                value -= self.weights.travel_very_long_penalty;
                reasons.push(format!(
                    "over {} min (-{})",
                    self.thresholds.very_long_min, self.weights.travel_very_long_penalty
                ));
            }
        }

        if !self.regional_prefix.is_empty()
            && staff.home_postal.starts_with(&self.regional_prefix)
            && student.postal_code.starts_with(&self.regional_prefix)
        {
            value += self.weights.regional;
            reasons.push(format!(
                "shared {}* region (+{})",
                self.regional_prefix, self.weights.regional
            ));
        }

        if roster.supervises_at(&staff.name, &student.institution) {
            value += self.weights.continuity;
            reasons.push("already covers this institution".to_string());
        }

        let current = roster.assigned_count(&staff.name);
        let target = staff.target_caseload;
        if current < target {
            let bonus = (target - current) as f64 * UNDER_TARGET_BONUS_STEP;
            value += bonus;
            reasons.push(format!("load {current}/{target} (+{bonus})"));
        } else if current == target {
            value -= AT_TARGET_PENALTY;
            reasons.push(format!("load {current}/{target} (-{AT_TARGET_PENALTY})"));
        } else {
            let penalty = (current - target) as f64 * self.weights.over_target_penalty;
            value -= penalty;
            reasons.push(format!("load {current}/{target} (-{penalty})"));
        }

        ScoredPair {
            value,
            rationale: reasons.join(" | "),
        }
    }
}
