//! Effective round-trip cost of adding an institution visit to a commute.

use crate::geo::coords::Coord;
use crate::geo::travel::{Pacer, RoutingProvider, TravelTimeEstimator};

/// Cost assigned when any endpoint never resolved. Must outrank every real
/// round trip so unreachable pairings sink to the bottom of the ranking.
pub const UNREACHABLE_MINUTES: f64 = 999.0;

/// Picks the cheapest way for a staff member to visit an institution:
/// a round trip from school, a round trip from home, or folding the visit
/// into the normal home↔school commute.
pub struct DetourCostModel<R, P> {
    school: Option<Coord>,
    estimator: TravelTimeEstimator<R, P>,
}

impl<R: RoutingProvider, P: Pacer> DetourCostModel<R, P> {
    pub fn new(school: Option<Coord>, estimator: TravelTimeEstimator<R, P>) -> Self {
        Self { school, estimator }
    }

    pub fn school(&self) -> Option<Coord> {
        self.school
    }

    /// Best total round-trip time in minutes. All candidates are full round
    /// trips, not one-way legs.
    pub fn effective_round_trip(
        &mut self,
        staff: Option<Coord>,
        institution: Option<Coord>,
    ) -> f64 {
        let (Some(school), Some(staff), Some(institution)) = (self.school, staff, institution)
        else {
            return UNREACHABLE_MINUTES;
        };

        let school_to_inst = self.estimator.duration(school, institution);
        let home_to_inst = self.estimator.duration(staff, institution);
        let home_to_school = self.estimator.duration(staff, school);
        let inst_to_school = self.estimator.duration(institution, school);

        let school_round_trip = school_to_inst * 2.0;
        let home_round_trip = home_to_inst * 2.0;

        // Home → institution → school → home, measured against the plain
        // commute both ways. An institution on the commute path costs nothing
        // extra; it never counts as a saving below the baseline.
        let commute_with_visit = home_to_inst + inst_to_school + home_to_school;
        let normal_commute = home_to_school * 2.0;
        let detour = (commute_with_visit - normal_commute).max(0.0);

        school_round_trip.min(home_round_trip).min(detour)
    }
}
