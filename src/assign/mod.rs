//! Staff-to-placement allocation: detour costs, affinity scoring, and the
//! greedy assignment pass that ties them together.

pub mod detour;
pub mod engine;
pub mod roster;
pub mod scoring;
pub mod validate;

use std::collections::HashMap;

use crate::config::PlannerConfig;
use crate::data::records::{StaffMember, StaffSummary, Student};
use crate::geo::cache::{GeocodeCache, RouteCache};
use crate::geo::resolver::{GeocodingProvider, GeoResolver};
use crate::geo::travel::{Pacer, RoutingProvider, TravelTimeEstimator};

pub use detour::{DetourCostModel, UNREACHABLE_MINUTES};
pub use engine::{AssignmentEngine, AssignmentOutcome, ResolvedStudent};
pub use roster::RosterState;
pub use scoring::{ScoredPair, ScoringEngine};
pub use validate::{check_caseloads, report_caseloads, LoadBand, LoadDiagnostic};

/// End-to-end planning pass: resolve every coordinate, then allocate.
pub fn plan_assignments<G, R, P>(
    students: &[Student],
    staff: &[StaffMember],
    config: &PlannerConfig,
    geocoder: G,
    router: R,
    pacer: P,
) -> AssignmentOutcome
where
    G: GeocodingProvider,
    R: RoutingProvider,
    P: Pacer + Clone,
{
    plan_with_caches(
        students,
        staff,
        config,
        geocoder,
        router,
        pacer,
        GeocodeCache::new(),
        RouteCache::new(),
    )
}

/// Like [plan_assignments], but starting from pre-populated caches. With both
/// caches fully warmed the pass issues no external calls at all, which also
/// makes reruns reproducible.
#[allow(clippy::too_many_arguments)]
pub fn plan_with_caches<G, R, P>(
    students: &[Student],
    staff: &[StaffMember],
    config: &PlannerConfig,
    geocoder: G,
    router: R,
    pacer: P,
    geocode_cache: GeocodeCache,
    route_cache: RouteCache,
) -> AssignmentOutcome
where
    G: GeocodingProvider,
    R: RoutingProvider,
    P: Pacer + Clone,
{
    let mut resolver =
        GeoResolver::with_cache(geocoder, pacer.clone(), config.country.clone(), geocode_cache);

    println!("geocoding school: {}", config.school_address);
    let school = resolver.resolve(&config.school_address, None);
    if school.is_none() {
        eprintln!("warning: school address unresolved; every travel term will rank as unreachable");
    }

    println!("geocoding {} placement institutions...", students.len());
    let resolved_students: Vec<ResolvedStudent> = students
        .iter()
        .map(|student| ResolvedStudent {
            student: student.clone(),
            coord: resolver.resolve(&student.full_address(), Some(&student.postal_code)),
        })
        .collect();

    let mut home_coords = HashMap::new();
    for member in staff {
        let coord = resolver.resolve(&member.home_address(&config.country), None);
        home_coords.insert(member.name.clone(), coord);
    }

    let estimator = TravelTimeEstimator::with_cache(router, pacer, route_cache);
    let detour = DetourCostModel::new(school, estimator);
    let scoring = ScoringEngine::new(
        config.scoring.clone(),
        config.travel_thresholds.clone(),
        config.regional_prefix.clone(),
        detour,
        home_coords,
    );

    AssignmentEngine::new(scoring).run(&resolved_students, staff)
}

/// Per-staff output summary derived from the final roster.
pub fn staff_summaries(staff: &[StaffMember], roster: &RosterState) -> Vec<StaffSummary> {
    staff
        .iter()
        .map(|member| StaffSummary {
            staff: member.name.clone(),
            assigned_count: roster.assigned_count(&member.name),
            distinct_institutions: roster.distinct_institutions(&member.name),
        })
        .collect()
}
