//! Pure world derivations for the Umbra planet reader.
//!
//! Nothing in this crate touches the ledger or the spatial knowledge store.
//! Every function takes plain values plus [`WorldConstants`] and returns new
//! values, so results depend only on their inputs.
//!
//! # Modules
//!
//! - [`environment`] -- Space type and biome classification from a
//!   coordinate's two noise values.
//! - [`growth`] -- Closed-form energy and silver growth between
//!   transactions.
//!
//! [`WorldConstants`]: umbra_types::WorldConstants

pub mod environment;
pub mod growth;

// Re-export primary functions at crate root.
pub use environment::{classify, locate, space_type_from_perlin};
pub use growth::{advance, clamp_to_cap};
