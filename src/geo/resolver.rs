//! Free-text address resolution with postal-code fallback.

use std::fmt;
use std::time::Duration;

use crate::geo::cache::GeocodeCache;
use crate::geo::coords::Coord;
use crate::geo::travel::Pacer;

/// Politeness pause before each external geocoding call (Nominatim asks for
/// at most one request per second).
pub const GEOCODE_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum GeocodeError {
    /// Transport or server failure.
    Http(String),
    /// The service answered with something we could not interpret.
    Malformed(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(detail) => write!(f, "http error: {detail}"),
            Self::Malformed(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

/// External geocoding call. `Ok(None)` means the service answered but found
/// nothing for the query.
pub trait GeocodingProvider {
    fn geocode(&mut self, query: &str) -> Result<Option<Coord>, GeocodeError>;
}

/// Resolves addresses to coordinates, remembering every outcome for the rest
/// of the run. A failed resolution is non-fatal; downstream scoring treats
/// the missing coordinate as an unreachable location.
pub struct GeoResolver<G, P> {
    provider: G,
    pacer: P,
    cache: GeocodeCache,
    country: String,
}

impl<G: GeocodingProvider, P: Pacer> GeoResolver<G, P> {
    pub fn new(provider: G, pacer: P, country: impl Into<String>) -> Self {
        Self::with_cache(provider, pacer, country, GeocodeCache::new())
    }

    pub fn with_cache(
        provider: G,
        pacer: P,
        country: impl Into<String>,
        cache: GeocodeCache,
    ) -> Self {
        Self { provider, pacer, cache, country: country.into() }
    }

    /// Resolve `address`, falling back to a "postal code, country" query when
    /// the full address finds nothing. Both outcomes (including failure) are
    /// cached under the original address string.
    pub fn resolve(&mut self, address: &str, postal_fallback: Option<&str>) -> Option<Coord> {
        if let Some(cached) = self.cache.get(address) {
            return cached;
        }
        let resolved = self.lookup(address, postal_fallback);
        self.cache.insert(address, resolved);
        resolved
    }

    fn lookup(&mut self, address: &str, postal_fallback: Option<&str>) -> Option<Coord> {
        self.pacer.pause(GEOCODE_PAUSE);
        match self.provider.geocode(address) {
            Ok(Some(coord)) => return Some(coord),
            Ok(None) => {}
            Err(err) => eprintln!("geocoding failed for '{address}': {err}"),
        }

        let Some(postal) = postal_fallback else {
            eprintln!("address not found: {address}");
            return None;
        };

        eprintln!("address not found: {address}; retrying with postal code {postal}");
        let query = format!("{postal}, {}", self.country);
        self.pacer.pause(GEOCODE_PAUSE);
        match self.provider.geocode(&query) {
            Ok(Some(coord)) => Some(coord),
            Ok(None) => {
                eprintln!("address and postal code both unresolved: {address}");
                None
            }
            Err(err) => {
                eprintln!("postal geocoding failed for '{query}': {err}");
                None
            }
        }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}
