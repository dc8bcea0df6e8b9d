//! Shared type definitions for the Umbra planet reader.
//!
//! This crate is the single source of truth for the values that flow between
//! the ledger collaborator, the replay and growth engines, and the browser
//! front end. Types derive `ts-rs` so the front end consumes the same shapes.
//!
//! # Modules
//!
//! - [`ids`] -- Fixed-width hex identifiers for planets, players, and arrivals
//! - [`enums`] -- Planet kinds, arrival kinds, space types, and biomes
//! - [`structs`] -- Planets, arrivals, coordinates, chunks, and resolved views
//! - [`constants`] -- Session-scoped world constants and growth models

pub mod constants;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use constants::{ConstantsError, GrowthModel, WorldConstants};
pub use enums::{ArrivalType, Biome, PlanetType, SpaceType};
pub use ids::{Address, ArrivalId, IdParseError, LocationId};
pub use structs::{
    Arrival, Chunk, ChunkFootprint, Coordinate, GrowthCheckpoint, LocatedPlanet, LocationBinding,
    LocationInfo, Planet, ResolvedPlanet,
};
