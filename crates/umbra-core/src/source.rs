//! Collaborator seams: ledger access and spatial knowledge.
//!
//! The reconciler never talks to a network or a disk itself. It reads
//! through two traits:
//!
//! - [`LedgerSource`] -- planet snapshots, pending arrivals, and the world
//!   constants, all asynchronous.
//! - [`SpatialKnowledge`] -- the chunks one player has explored, with an
//!   asynchronous planet lookup.
//!
//! [`MemoryLedger`] and [`ChunkStore`] are in-memory implementations,
//! loadable from JSON dumps.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_types::{
    Arrival, Chunk, ChunkFootprint, LocationBinding, LocationId, Planet, WorldConstants,
};

/// Errors raised by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The collaborator could not be reached.
    #[error("source unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// The collaborator answered with data that makes no sense.
    #[error("malformed source data: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },

    /// Failed to read a dump from disk.
    #[error("failed to read dump: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to decode a JSON dump.
    #[error("failed to decode dump: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Read access to the ledger.
pub trait LedgerSource: Send + Sync {
    /// The planet's last ledger-written state, or `None` if the ledger has
    /// never seen it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the ledger cannot answer.
    fn planet(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Planet>, SourceError>> + Send;

    /// Arrivals queued for the planet, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the ledger cannot answer.
    fn arrivals(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Vec<Arrival>, SourceError>> + Send;

    /// The world constants. Called once per reader.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the ledger cannot answer.
    fn constants(&self) -> impl Future<Output = Result<WorldConstants, SourceError>> + Send;
}

/// Serialized ledger contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDump {
    /// World constants.
    #[serde(default)]
    pub constants: WorldConstants,
    /// Planet snapshots.
    #[serde(default)]
    pub planets: Vec<Planet>,
    /// Queued arrivals for any planet.
    #[serde(default)]
    pub arrivals: Vec<Arrival>,
}

/// A ledger held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    constants: WorldConstants,
    planets: BTreeMap<LocationId, Planet>,
    arrivals: BTreeMap<LocationId, Vec<Arrival>>,
}

impl MemoryLedger {
    /// Create an empty ledger with the given constants.
    pub const fn new(constants: WorldConstants) -> Self {
        Self {
            constants,
            planets: BTreeMap::new(),
            arrivals: BTreeMap::new(),
        }
    }

    /// Build a ledger from a dump.
    pub fn from_dump(dump: LedgerDump) -> Self {
        let mut ledger = Self::new(dump.constants);
        for planet in dump.planets {
            ledger.insert_planet(planet);
        }
        for arrival in dump.arrivals {
            ledger.queue_arrival(arrival);
        }
        ledger
    }

    /// Decode a JSON dump.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the text is not a valid dump.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let dump: LedgerDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(dump))
    }

    /// Read and decode a JSON dump file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Json`] if it is not a valid dump.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Store a planet snapshot, replacing any previous one.
    pub fn insert_planet(&mut self, planet: Planet) {
        self.planets.insert(planet.location_id, planet);
    }

    /// Queue an arrival under its destination.
    pub fn queue_arrival(&mut self, arrival: Arrival) {
        self.arrivals
            .entry(arrival.to_planet)
            .or_default()
            .push(arrival);
    }

    /// Number of planets held.
    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    /// Ids of every planet held, ascending.
    pub fn planet_ids(&self) -> Vec<LocationId> {
        self.planets.keys().copied().collect()
    }
}

impl LedgerSource for MemoryLedger {
    async fn planet(&self, id: LocationId) -> Result<Option<Planet>, SourceError> {
        Ok(self.planets.get(&id).cloned())
    }

    async fn arrivals(&self, id: LocationId) -> Result<Vec<Arrival>, SourceError> {
        Ok(self.arrivals.get(&id).cloned().unwrap_or_default())
    }

    async fn constants(&self) -> Result<WorldConstants, SourceError> {
        Ok(self.constants.clone())
    }
}

// ---------------------------------------------------------------------------
// Spatial knowledge
// ---------------------------------------------------------------------------

/// One player's explored map.
pub trait SpatialKnowledge: Send + Sync {
    /// Every explored chunk.
    fn chunks(&self) -> impl Iterator<Item = &Chunk>;

    /// The binding for `id`, if any explored chunk contains it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the store cannot answer.
    fn find_binding(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<LocationBinding>, SourceError>> + Send {
        std::future::ready(Ok(scan_bindings(self.chunks(), id)))
    }
}

/// First binding for `id` across `chunks`, in iteration order.
pub fn scan_bindings<'a>(
    chunks: impl IntoIterator<Item = &'a Chunk>,
    id: LocationId,
) -> Option<LocationBinding> {
    chunks
        .into_iter()
        .flat_map(|chunk| chunk.planet_locations.iter())
        .find(|binding| binding.hash == id)
        .copied()
}

/// Knowledge of nothing. Every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unexplored;

impl SpatialKnowledge for Unexplored {
    fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        std::iter::empty()
    }
}

/// Explored chunks held in memory, indexed by footprint and by planet.
///
/// The planet index always agrees with a scan of the chunks in footprint
/// order, including when footprints overlap.
#[derive(Debug, Clone, Default)]
pub struct ChunkStore {
    chunks: BTreeMap<ChunkFootprint, Chunk>,
    bindings: BTreeMap<LocationId, LocationBinding>,
}

impl ChunkStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            chunks: BTreeMap::new(),
            bindings: BTreeMap::new(),
        }
    }

    /// Build a store from chunks. Later chunks replace earlier ones with
    /// the same footprint.
    pub fn from_chunks(chunks: impl IntoIterator<Item = Chunk>) -> Self {
        let mut store = Self::new();
        for chunk in chunks {
            store.add_chunk(chunk);
        }
        store
    }

    /// Decode a JSON list of chunks.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the text is not a chunk list.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let chunks: Vec<Chunk> = serde_json::from_str(json)?;
        Ok(Self::from_chunks(chunks))
    }

    /// Read and decode a JSON chunk list file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Json`] if it is not a chunk list.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Record an explored chunk, replacing any chunk with the same footprint.
    pub fn add_chunk(&mut self, chunk: Chunk) {
        let mut touched: Vec<LocationId> =
            chunk.planet_locations.iter().map(|binding| binding.hash).collect();
        if let Some(previous) = self.chunks.insert(chunk.footprint, chunk) {
            touched.extend(previous.planet_locations.iter().map(|binding| binding.hash));
        }

        // Another chunk may still hold a planet the replaced chunk dropped.
        for id in touched {
            match scan_bindings(self.chunks.values(), id) {
                Some(binding) => self.bindings.insert(id, binding),
                None => self.bindings.remove(&id),
            };
        }
    }

    /// Number of explored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing has been explored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn lookup(&self, id: LocationId) -> Option<LocationBinding> {
        self.bindings.get(&id).copied()
    }
}

impl SpatialKnowledge for ChunkStore {
    fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    async fn find_binding(&self, id: LocationId) -> Result<Option<LocationBinding>, SourceError> {
        Ok(self.lookup(id))
    }
}
