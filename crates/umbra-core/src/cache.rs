//! Last-known resolutions, newest wins.
//!
//! Concurrent loads of the same planet can finish in any order. A result is
//! kept only if it is at least as recent, by `last_updated`, as the one
//! already held, so a slow load can never roll a planet back.

use std::collections::BTreeMap;

use umbra_types::{LocationId, ResolvedPlanet};

/// Resolved planets keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCache {
    entries: BTreeMap<LocationId, ResolvedPlanet>,
}

impl ResolvedCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Offer a resolution. Returns whether it was kept.
    ///
    /// Ties go to the newcomer, so a resolution that gained a location at
    /// the same second replaces the unlocated one.
    pub fn offer(&mut self, resolved: ResolvedPlanet) -> bool {
        let id = resolved.planet().location_id;
        let incoming = resolved.planet().last_updated;
        match self.entries.get(&id) {
            Some(held) if held.planet().last_updated > incoming => {
                tracing::debug!(
                    planet = %id,
                    held = held.planet().last_updated,
                    offered = incoming,
                    "discarded stale resolution"
                );
                false
            }
            _ => {
                self.entries.insert(id, resolved);
                true
            }
        }
    }

    /// The newest resolution held for `id`.
    pub fn get(&self, id: &LocationId) -> Option<&ResolvedPlanet> {
        self.entries.get(id)
    }

    /// Every held resolution, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPlanet> {
        self.entries.values()
    }

    /// Number of planets held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
