//! Run-lifetime caches for geocoding and routing lookups.
//!
//! Each cache has a single owner per run and is handed to its consumer at
//! construction time. Entries are write-once: the first result stored for a
//! key wins, later inserts for the same key are ignored. Nothing is persisted
//! across runs.

use std::collections::HashMap;

use crate::geo::coords::Coord;

/// Address text → resolved coordinate (or a remembered failure).
///
/// Failures are cached too, so an address that resolved to nothing is not
/// retried on every later lookup of the same string.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, Option<Coord>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` = never looked up; `Some(None)` = looked up, unresolved.
    pub fn get(&self, address: &str) -> Option<Option<Coord>> {
        self.entries.get(address).copied()
    }

    pub fn insert(&mut self, address: &str, coord: Option<Coord>) {
        self.entries.entry(address.to_string()).or_insert(coord);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Directed coordinate pair → driving minutes.
///
/// The key is ordered: A→B and B→A are distinct entries and may hold
/// different durations.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    entries: HashMap<(u64, u64, u64, u64), f64>,
}

fn leg_key(from: Coord, to: Coord) -> (u64, u64, u64, u64) {
    // Coordinates come straight from the geocoder, never from arithmetic,
    // so bitwise identity is the right notion of "same point".
    (
        from.lat.to_bits(),
        from.lon.to_bits(),
        to.lat.to_bits(),
        to.lon.to_bits(),
    )
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, from: Coord, to: Coord) -> Option<f64> {
        self.entries.get(&leg_key(from, to)).copied()
    }

    pub fn insert(&mut self, from: Coord, to: Coord, minutes: f64) {
        self.entries.entry(leg_key(from, to)).or_insert(minutes);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{GeocodeCache, RouteCache};
    use crate::geo::coords::Coord;

    #[test]
    fn geocode_cache_first_write_wins() {
        let mut cache = GeocodeCache::new();
        cache.insert("Paradeplatz 3", Some(Coord::new(54.3, 9.66)));
        cache.insert("Paradeplatz 3", None);
        assert_eq!(cache.get("Paradeplatz 3"), Some(Some(Coord::new(54.3, 9.66))));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn geocode_cache_remembers_failures() {
        let mut cache = GeocodeCache::new();
        cache.insert("Nowhere Lane 0", None);
        assert_eq!(cache.get("Nowhere Lane 0"), Some(None));
    }

    #[test]
    fn route_cache_is_directional() {
        let a = Coord::new(54.0, 9.0);
        let b = Coord::new(54.5, 9.5);
        let mut cache = RouteCache::new();
        cache.insert(a, b, 21.0);
        assert_eq!(cache.get(a, b), Some(21.0));
        assert_eq!(cache.get(b, a), None);
        cache.insert(b, a, 25.0);
        assert_eq!(cache.get(b, a), Some(25.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn route_cache_first_write_wins() {
        let a = Coord::new(54.0, 9.0);
        let b = Coord::new(54.5, 9.5);
        let mut cache = RouteCache::new();
        cache.insert(a, b, 21.0);
        cache.insert(a, b, 99.0);
        assert_eq!(cache.get(a, b), Some(21.0));
    }
}
