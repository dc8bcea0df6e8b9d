//! Core value types: planets, arrivals, coordinates, and resolved views.
//!
//! A [`Planet`] is a read-through copy of ledger state, valid only as of its
//! `last_updated` second. Location data never lives on a [`Planet`]; it is
//! attached by wrapping the planet in a [`LocatedPlanet`], which carries the
//! coordinate and its classification together in one [`LocationInfo`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ArrivalType, Biome, PlanetType, SpaceType};
use crate::ids::{Address, ArrivalId, LocationId};

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

/// The state growth formulas start from.
///
/// The ledger only rewrites a planet when a transaction touches it, and it
/// always recomputes growth from the values it stored at that moment. The
/// checkpoint keeps those values so that advancing a planet to any later
/// time evaluates the same closed form the ledger would, no matter how many
/// intermediate advances happened client-side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GrowthCheckpoint {
    /// Second at which the checkpoint values were valid.
    pub time: u64,
    /// Energy at `time`.
    pub energy: f64,
    /// Silver at `time`.
    pub silver: f64,
}

/// A planet as reported by the ledger and brought forward client-side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Planet {
    /// Hash of the planet's coordinates.
    pub location_id: LocationId,
    /// Current owner; [`Address::ZERO`] when unowned.
    pub owner: Address,
    /// Planet level (0-9).
    pub planet_level: u8,
    /// Kind of planet.
    pub planet_type: PlanetType,
    /// Energy (population) on the planet.
    pub energy: f64,
    /// Maximum energy.
    pub energy_cap: f64,
    /// Energy growth rate.
    pub energy_growth: f64,
    /// Silver (resource) on the planet.
    pub silver: f64,
    /// Maximum silver.
    pub silver_cap: f64,
    /// Silver gained per second while owned. Non-zero only for mines.
    pub silver_growth: f64,
    /// Defense in percent. Incoming damage is scaled by `100 / defense`.
    pub defense: u32,
    /// Second at which every other field is valid.
    pub last_updated: u64,
    /// Number of active effects freezing growth.
    pub pausers: u32,
    /// A destroyed planet keeps its state but absorbs arrivals.
    pub destroyed: bool,
    /// Growth checkpoint. Absent on fresh ledger snapshots, where the
    /// reported fields are themselves the checkpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub checkpoint: Option<GrowthCheckpoint>,
}

impl Planet {
    /// Whether the planet has an owner.
    pub fn has_owner(&self) -> bool {
        !self.owner.is_zero()
    }

    /// Whether growth is frozen.
    pub const fn is_paused(&self) -> bool {
        self.pausers > 0
    }

    /// The checkpoint growth is measured from.
    pub fn growth_origin(&self) -> GrowthCheckpoint {
        self.checkpoint.unwrap_or(GrowthCheckpoint {
            time: self.last_updated,
            energy: self.energy,
            silver: self.silver,
        })
    }
}

// ---------------------------------------------------------------------------
// Arrival
// ---------------------------------------------------------------------------

/// A queued fleet arrival, as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Arrival {
    /// Ledger-assigned id.
    pub arrival_id: ArrivalId,
    /// The player who launched the fleet.
    pub player: Address,
    /// Planet the fleet left.
    pub from_planet: LocationId,
    /// Planet the fleet lands on.
    pub to_planet: LocationId,
    /// Energy carried.
    pub energy_arriving: f64,
    /// Silver carried.
    pub silver_moved: f64,
    /// Launch second.
    pub departure_time: u64,
    /// Landing second.
    pub arrival_time: u64,
    /// How the fleet travelled.
    #[serde(default)]
    pub arrival_type: ArrivalType,
}

// ---------------------------------------------------------------------------
// Spatial knowledge
// ---------------------------------------------------------------------------

/// A location in the world's coordinate space with its two noise values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinate {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
    /// First noise value; selects the space type.
    pub perlin: u32,
    /// Second noise value; selects the sub-biome.
    pub biomebase: u32,
}

/// One explored planet: the coordinate whose hash is `hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocationBinding {
    /// Location id the coordinate hashes to.
    pub hash: LocationId,
    /// The coordinate.
    pub coordinate: Coordinate,
}

/// The square region a chunk covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct ChunkFootprint {
    /// X of the bottom-left corner.
    pub bottom_left_x: i64,
    /// Y of the bottom-left corner.
    pub bottom_left_y: i64,
    /// Edge length.
    pub side_length: u32,
}

/// An explored region and the planets discovered in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Chunk {
    /// Region covered.
    pub footprint: ChunkFootprint,
    /// Planets found while exploring the region.
    #[serde(default)]
    pub planet_locations: Vec<LocationBinding>,
    /// Noise value sampled at the chunk center.
    #[serde(default)]
    pub perlin: u32,
}

// ---------------------------------------------------------------------------
// Resolved views
// ---------------------------------------------------------------------------

/// Where a planet is and what its surroundings are.
///
/// Coordinate and classification only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocationInfo {
    /// The planet's coordinate.
    pub coordinate: Coordinate,
    /// Region class of the coordinate.
    pub space_type: SpaceType,
    /// Sub-biome of the coordinate.
    pub biome: Biome,
}

/// A planet together with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocatedPlanet {
    /// Ledger state.
    pub planet: Planet,
    /// Private location.
    pub location: LocationInfo,
}

/// The fully reconciled view of a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResolvedPlanet {
    /// The viewer has not explored this planet's coordinates.
    Unlocated(Planet),
    /// The viewer knows where this planet is.
    Located(LocatedPlanet),
}

impl ResolvedPlanet {
    /// The ledger state, located or not.
    pub const fn planet(&self) -> &Planet {
        match self {
            Self::Unlocated(planet) => planet,
            Self::Located(located) => &located.planet,
        }
    }

    /// The location, if known.
    pub const fn location(&self) -> Option<&LocationInfo> {
        match self {
            Self::Unlocated(_) => None,
            Self::Located(located) => Some(&located.location),
        }
    }

    /// Drop the location and keep the ledger state.
    pub fn into_planet(self) -> Planet {
        match self {
            Self::Unlocated(planet) => planet,
            Self::Located(located) => located.planet,
        }
    }
}
