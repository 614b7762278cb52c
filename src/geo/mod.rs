//! Address resolution and travel-time estimation against external services,
//! with run-lifetime caching and graceful degradation when the network
//! misbehaves.

pub mod cache;
pub mod coords;
pub mod providers;
pub mod resolver;
pub mod travel;

pub use cache::{GeocodeCache, RouteCache};
pub use coords::Coord;
pub use providers::{NominatimGeocoder, OrsRouter};
pub use resolver::{GeocodeError, GeocodingProvider, GeoResolver, GEOCODE_PAUSE};
pub use travel::{
    Pacer, RoutingError, RoutingProvider, TravelTimeEstimator, WallClockPacer,
    FALLBACK_MINUTES_PER_KM, RATE_LIMIT_COOLDOWN, ROUTE_PAUSE,
};
