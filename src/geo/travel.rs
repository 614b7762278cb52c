//! Driving-time lookup with caching and degraded-mode fallback.
//!
//! Routed durations come from an external service that can rate-limit, fail
//! to find a route, or reject a coordinate outright. Every failure degrades
//! to a straight-line estimate; callers never see the difference, they just
//! get minutes.

use std::fmt;
use std::time::Duration;

use crate::geo::cache::RouteCache;
use crate::geo::coords::Coord;

/// Pause after every successful routing call (service etiquette: the free
/// tier allows ~40 requests per minute, 1.6 s keeps headroom).
pub const ROUTE_PAUSE: Duration = Duration::from_millis(1600);

/// Cooldown after a rate-limit response before the single retry.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(65);

/// Straight-line fallback: one kilometer ≈ 1.5 driving minutes.
pub const FALLBACK_MINUTES_PER_KM: f64 = 1.5;

#[derive(Debug)]
pub enum RoutingError {
    /// The service said to slow down (HTTP 429).
    RateLimited,
    /// No drivable route connects the two points.
    NoRoute,
    /// A point could not be snapped to the road network.
    Unroutable,
    /// Anything else: transport failure, malformed response, server error.
    Unexpected(String),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate limited"),
            Self::NoRoute => write!(f, "no route found"),
            Self::Unroutable => write!(f, "coordinate not routable"),
            Self::Unexpected(detail) => write!(f, "{detail}"),
        }
    }
}

/// External routing call, one directed leg at a time.
pub trait RoutingProvider {
    fn route_minutes(&mut self, from: Coord, to: Coord) -> Result<f64, RoutingError>;
}

/// Injectable sleep dependency. Production pacing sleeps the thread; tests
/// record the requested pauses instead of waiting them out.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockPacer;

impl Pacer for WallClockPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Cached driving-duration lookups between coordinates.
pub struct TravelTimeEstimator<R, P> {
    provider: R,
    pacer: P,
    cache: RouteCache,
}

impl<R: RoutingProvider, P: Pacer> TravelTimeEstimator<R, P> {
    pub fn new(provider: R, pacer: P) -> Self {
        Self::with_cache(provider, pacer, RouteCache::new())
    }

    /// Start from a pre-populated cache. Useful for replaying a run without
    /// re-issuing external calls.
    pub fn with_cache(provider: R, pacer: P, cache: RouteCache) -> Self {
        Self { provider, pacer, cache }
    }

    /// Driving minutes from `from` to `to`. Direction matters; the reverse
    /// leg is looked up and cached independently.
    pub fn duration(&mut self, from: Coord, to: Coord) -> f64 {
        if let Some(minutes) = self.cache.get(from, to) {
            return minutes;
        }

        let minutes = match self.route_with_retry(from, to) {
            Ok(minutes) => {
                self.pacer.pause(ROUTE_PAUSE);
                minutes
            }
            Err(err) => {
                match err {
                    RoutingError::RateLimited => {
                        eprintln!("rate limit persists, using straight-line estimate");
                    }
                    // Known dead ends: fall back without noise.
                    RoutingError::NoRoute | RoutingError::Unroutable => {}
                    RoutingError::Unexpected(detail) => {
                        eprintln!("routing error: {detail}");
                    }
                }
                from.haversine_km(to) * FALLBACK_MINUTES_PER_KM
            }
        };

        self.cache.insert(from, to, minutes);
        minutes
    }

    /// One rate-limit cooldown, one retry, no further attempts.
    fn route_with_retry(&mut self, from: Coord, to: Coord) -> Result<f64, RoutingError> {
        match self.provider.route_minutes(from, to) {
            Err(RoutingError::RateLimited) => {
                eprintln!(
                    "rate limit hit, cooling down for {}s",
                    RATE_LIMIT_COOLDOWN.as_secs()
                );
                self.pacer.pause(RATE_LIMIT_COOLDOWN);
                self.provider.route_minutes(from, to)
            }
            outcome => outcome,
        }
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }
}
