//! Planet reconciliation for the Umbra reader.
//!
//! This crate ties the pure engines together behind the collaborator seams:
//! it fetches ledger state, replays queued arrivals, advances growth to the
//! current second, and attaches the viewer's location data.
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with system and fixed implementations.
//! - [`config`] -- Configuration loading from `umbra-config.yaml` into
//!   strongly-typed structs.
//! - [`source`] -- [`LedgerSource`] and [`SpatialKnowledge`] traits with
//!   in-memory implementations.
//! - [`reconciler`] -- [`resolve`] and the session-scoped [`PlanetReader`].
//! - [`cache`] -- [`ResolvedCache`], which keeps the newest resolution per
//!   planet.
//!
//! [`Clock`]: clock::Clock
//! [`LedgerSource`]: source::LedgerSource
//! [`SpatialKnowledge`]: source::SpatialKnowledge
//! [`resolve`]: reconciler::resolve
//! [`PlanetReader`]: reconciler::PlanetReader
//! [`ResolvedCache`]: cache::ResolvedCache

pub mod cache;
pub mod clock;
pub mod config;
pub mod reconciler;
pub mod source;

pub use cache::ResolvedCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, LoggingConfig, ReaderConfig, SourcesConfig};
pub use reconciler::{PlanetReader, ReconcileError, Viewer, resolve, situate};
pub use source::{
    ChunkStore, LedgerDump, LedgerSource, MemoryLedger, SourceError, SpatialKnowledge, Unexplored,
    scan_bindings,
};
