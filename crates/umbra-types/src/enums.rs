//! Enumeration types for planets, arrivals, and the environment.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Planets
// ---------------------------------------------------------------------------

/// The kind of body a planet is.
///
/// The type does not change how a planet grows: growth follows the
/// planet's own rates, and every type is clamped to its caps the same way.
/// Silver mines are the only type the ledger gives a non-zero silver rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum PlanetType {
    /// An ordinary planet.
    #[default]
    Planet,
    /// An asteroid field that mines silver over time.
    SilverMine,
    /// Ruins holding an artifact.
    Ruins,
    /// A trading post.
    TradingPost,
    /// A quasar that stores silver.
    SilverBank,
}

// ---------------------------------------------------------------------------
// Arrivals
// ---------------------------------------------------------------------------

/// How a fleet travelled to its destination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum ArrivalType {
    /// A plain voyage.
    #[default]
    Normal,
    /// A voyage launched through a photoid cannon.
    Photoid,
    /// A voyage through a wormhole. A wormhole arrival at a planet the
    /// sender does not own carries no energy.
    Wormhole,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Region class derived from the first noise value of a coordinate.
///
/// Variants are declared in ascending noise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SpaceType {
    /// Lowest band, below the first threshold.
    Nebula,
    /// Between the first and second thresholds.
    Space,
    /// Between the second and third thresholds.
    DeepSpace,
    /// At or above the third threshold. Always corrupted.
    DeadSpace,
}

impl SpaceType {
    /// Position of the band in ascending noise order (0 for nebula).
    pub const fn index(self) -> u8 {
        match self {
            Self::Nebula => 0,
            Self::Space => 1,
            Self::DeepSpace => 2,
            Self::DeadSpace => 3,
        }
    }
}

/// Sub-biome of a located planet.
///
/// The discriminants are the values the ledger and the front end use:
/// `3 * space_index + offset` for the three habitable bands, and
/// [`Biome::Corrupted`] for dead space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Biome {
    /// Not derivable (never produced by classification).
    Unknown = 0,
    /// Nebula, low biomebase.
    Ocean = 1,
    /// Nebula, mid biomebase.
    Forest = 2,
    /// Nebula, high biomebase.
    Grassland = 3,
    /// Space, low biomebase.
    Tundra = 4,
    /// Space, mid biomebase.
    Swamp = 5,
    /// Space, high biomebase.
    Desert = 6,
    /// Deep space, low biomebase.
    Ice = 7,
    /// Deep space, mid biomebase.
    Wasteland = 8,
    /// Deep space, high biomebase.
    Lava = 9,
    /// Dead space.
    Corrupted = 10,
}

impl Biome {
    /// Map a numeric biome value back to the enum. Out-of-range values map
    /// to [`Biome::Unknown`].
    pub const fn from_index(value: u8) -> Self {
        match value {
            1 => Self::Ocean,
            2 => Self::Forest,
            3 => Self::Grassland,
            4 => Self::Tundra,
            5 => Self::Swamp,
            6 => Self::Desert,
            7 => Self::Ice,
            8 => Self::Wasteland,
            9 => Self::Lava,
            10 => Self::Corrupted,
            _ => Self::Unknown,
        }
    }

    /// The numeric value of this biome.
    pub const fn index(self) -> u8 {
        self as u8
    }
}
