//! Reconciliation of ledger state into the planet a viewer sees right now.
//!
//! # Resolution Pipeline
//!
//! 1. Fetch the snapshot, its queued arrivals, and the viewer's binding for
//!    it concurrently.
//! 2. Replay every arrival due by `now`, in `(arrival_time, arrival_id)`
//!    order.
//! 3. Advance the result to `now`.
//! 4. Attach the viewer's coordinate and its classification, if the viewer
//!    has explored the planet.
//!
//! Nothing is cached or mutated along the way. A failed fetch or a rejected
//! arrival batch fails the whole resolution; retrying is the caller's call.

use futures::future::join_all;
use tracing::{debug, info, warn};
use umbra_ledger::{CapCheck, ReplayError, check_caps, replay};
use umbra_types::{
    Address, ConstantsError, LocatedPlanet, LocationBinding, LocationId, Planet, ResolvedPlanet,
    WorldConstants,
};
use umbra_world::{advance, locate};

use crate::clock::Clock;
use crate::source::{LedgerSource, SourceError, SpatialKnowledge, Unexplored};

/// Errors that can occur while resolving a planet.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The ledger has no snapshot for the planet.
    #[error("planet {0} not found in ledger")]
    NotFound(LocationId),

    /// The queued arrivals could not be replayed.
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// A collaborator failed.
    #[error("ledger source failed: {0}")]
    Source(#[from] SourceError),

    /// The ledger's world constants are unusable.
    #[error("invalid world constants: {0}")]
    Constants(#[from] ConstantsError),
}

/// Resolve one planet as of `now`.
///
/// # Errors
///
/// - [`ReconcileError::NotFound`] if the ledger has no snapshot.
/// - [`ReconcileError::Source`] if the ledger or the spatial knowledge
///   fails, or the snapshot is for a different planet.
/// - [`ReconcileError::Replay`] if the queued arrivals are inconsistent
///   with the snapshot.
pub async fn resolve<L, K>(
    id: LocationId,
    ledger: &L,
    knowledge: &K,
    constants: &WorldConstants,
    now: u64,
) -> Result<ResolvedPlanet, ReconcileError>
where
    L: LedgerSource,
    K: SpatialKnowledge,
{
    let (snapshot, arrivals, binding) = futures::try_join!(
        ledger.planet(id),
        ledger.arrivals(id),
        knowledge.find_binding(id)
    )?;
    let snapshot = snapshot.ok_or(ReconcileError::NotFound(id))?;
    if snapshot.location_id != id {
        return Err(SourceError::Malformed {
            message: format!("asked for planet {id}, got {}", snapshot.location_id),
        }
        .into());
    }

    if let CapCheck::Violations(violations) = check_caps(&snapshot) {
        for violation in &violations {
            warn!(planet = %id, %violation, "ledger snapshot outside caps");
        }
    }

    let replayed = replay(&snapshot, &arrivals, now, constants)?;
    let planet = advance(&replayed.planet, now, constants);

    debug!(
        planet = %id,
        now,
        applied = replayed.applied.len(),
        pending = replayed.pending.len(),
        energy = planet.energy,
        silver = planet.silver,
        owner = %planet.owner,
        "resolved planet"
    );

    Ok(situate(planet, binding, constants))
}

/// Attach location data if the viewer has a binding for the planet.
///
/// This is the only place a [`LocatedPlanet`] is built, so coordinate and
/// classification are always present together or not at all.
pub fn situate(
    planet: Planet,
    binding: Option<LocationBinding>,
    constants: &WorldConstants,
) -> ResolvedPlanet {
    match binding {
        Some(binding) => ResolvedPlanet::Located(LocatedPlanet {
            planet,
            location: locate(binding.coordinate, constants),
        }),
        None => ResolvedPlanet::Unlocated(planet),
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// A player and the map they have explored.
#[derive(Debug, Clone)]
pub struct Viewer<K> {
    /// The player.
    pub address: Address,
    /// Their explored chunks.
    pub knowledge: K,
}

/// Session-scoped planet reader.
///
/// Holds the ledger, the constants fetched from it at creation, an optional
/// viewer, and a clock. Every load resolves from scratch against the clock's
/// current second.
#[derive(Debug)]
pub struct PlanetReader<L, K, C> {
    ledger: L,
    constants: WorldConstants,
    viewer: Option<Viewer<K>>,
    clock: C,
}

impl<L, K, C> PlanetReader<L, K, C>
where
    L: LedgerSource,
    K: SpatialKnowledge,
    C: Clock,
{
    /// Fetch and validate the world constants, then build a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Source`] if the constants cannot be fetched,
    /// or [`ReconcileError::Constants`] if they are unusable.
    pub async fn create(
        ledger: L,
        viewer: Option<Viewer<K>>,
        clock: C,
    ) -> Result<Self, ReconcileError> {
        let constants = ledger.constants().await?;
        constants.validate()?;

        info!(
            version = constants.version,
            growth = ?constants.growth,
            viewer = ?viewer.as_ref().map(|v| v.address),
            "planet reader ready"
        );

        Ok(Self {
            ledger,
            constants,
            viewer,
            clock,
        })
    }

    /// The constants fetched at creation.
    pub const fn constants(&self) -> &WorldConstants {
        &self.constants
    }

    /// The viewer's address, if there is one.
    pub fn viewer(&self) -> Option<Address> {
        self.viewer.as_ref().map(|viewer| viewer.address)
    }

    /// Resolve one planet as of the clock's current second.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub async fn load_planet(&self, id: LocationId) -> Result<ResolvedPlanet, ReconcileError> {
        let now = self.clock.now();
        match &self.viewer {
            Some(viewer) => resolve(id, &self.ledger, &viewer.knowledge, &self.constants, now).await,
            None => resolve(id, &self.ledger, &Unexplored, &self.constants, now).await,
        }
    }

    /// Resolve many planets concurrently. One result per id, in input order.
    pub async fn load_planets(
        &self,
        ids: &[LocationId],
    ) -> Vec<(LocationId, Result<ResolvedPlanet, ReconcileError>)> {
        join_all(
            ids.iter()
                .map(|&id| async move { (id, self.load_planet(id).await) }),
        )
        .await
    }
}
